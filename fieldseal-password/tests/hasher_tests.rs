use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};

use fieldseal_password::{hash_password, needs_rehash, verify_password, PasswordError};

/// Builds a hash at deliberately low cost, the shape of credentials written
/// before the targets were raised.
fn low_cost_hash(password: &str) -> String {
    let params = Params::new(1024, 1, 1, None).unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

#[test]
fn same_password_hashes_differently_and_both_verify() {
    let h1 = hash_password("SecurePass123!").unwrap();
    let h2 = hash_password("SecurePass123!").unwrap();

    assert_ne!(h1, h2);
    assert!(verify_password("SecurePass123!", &h1).unwrap());
    assert!(verify_password("SecurePass123!", &h2).unwrap());
}

#[test]
fn registration_login_round_trip() {
    let hash = hash_password("SecurePass123!").unwrap();
    assert!(verify_password("SecurePass123!", &hash).unwrap());
    assert!(!verify_password("WrongPassword123!", &hash).unwrap());
    assert!(!needs_rehash(&hash));
}

#[test]
fn empty_password_is_rejected() {
    assert!(matches!(
        hash_password(""),
        Err(PasswordError::EmptyPassword)
    ));
    assert!(matches!(
        hash_password("   \t  "),
        Err(PasswordError::EmptyPassword)
    ));
}

#[test]
fn short_password_is_rejected() {
    assert!(matches!(
        hash_password("Ab1!xyz"),
        Err(PasswordError::TooShort { min: 8 })
    ));
}

#[test]
fn hash_is_a_phc_string_with_inspectable_cost() {
    let hash = hash_password("SecurePass123!").unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(hash.contains("m=19456"));
    assert!(hash.contains("t=2"));
}

// ── verify_password ──────────────────────────────────────────────

#[test]
fn verify_with_empty_inputs_is_missing_input() {
    let hash = hash_password("SecurePass123!").unwrap();
    assert!(matches!(
        verify_password("", &hash),
        Err(PasswordError::MissingInput)
    ));
    assert!(matches!(
        verify_password("SecurePass123!", ""),
        Err(PasswordError::MissingInput)
    ));
}

#[test]
fn verify_with_malformed_hash_is_an_error_not_false() {
    let result = verify_password("SecurePass123!", "not-a-phc-string");
    assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
}

// ── needs_rehash ─────────────────────────────────────────────────

#[test]
fn fresh_hash_does_not_need_rehash() {
    let hash = hash_password("SecurePass123!").unwrap();
    assert!(!needs_rehash(&hash));
}

#[test]
fn low_cost_hash_needs_rehash() {
    let hash = low_cost_hash("SecurePass123!");
    // Old hash still verifies, but should be upgraded on next login.
    assert!(verify_password("SecurePass123!", &hash).unwrap());
    assert!(needs_rehash(&hash));
}

#[test]
fn other_algorithm_needs_rehash() {
    let params = Params::new(19 * 1024, 2, 1, None).unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(b"SecurePass123!", &salt)
        .unwrap()
        .to_string();

    assert!(needs_rehash(&hash));
}

#[test]
fn unparseable_hash_needs_rehash() {
    assert!(needs_rehash(""));
    assert!(needs_rehash("plaintext-oops"));
    assert!(needs_rehash("$argon2id$garbage"));
}
