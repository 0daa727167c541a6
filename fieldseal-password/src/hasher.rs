//! Adaptive password hashing using Argon2id.
//!
//! Hashes are PHC strings carrying the algorithm, cost parameters, salt, and
//! digest, so the cost of an existing hash can be inspected without the
//! password. When the targets in [`crate::policy`] are raised, old hashes
//! report [`needs_rehash`] and get recomputed on the next successful login —
//! no mass reset required.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::{PasswordError, PasswordResult};
use crate::policy;

fn current_params() -> PasswordResult<Params> {
    Params::new(
        policy::MEMORY_COST_KIB,
        policy::TIME_COST,
        policy::PARALLELISM,
        None,
    )
    .map_err(|e| PasswordError::Hashing(e.to_string()))
}

fn current_hasher() -> PasswordResult<Argon2<'static>> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        current_params()?,
    ))
}

/// Hashes a password at the current cost targets.
///
/// Every call salts freshly, so two hashes of the same password never
/// compare equal. Empty or whitespace-only input and input under
/// [`policy::HASH_MIN_LEN`] characters are rejected before any hashing work.
pub fn hash_password(password: &str) -> PasswordResult<String> {
    if password.trim().is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    if password.chars().count() < policy::HASH_MIN_LEN {
        return Err(PasswordError::TooShort {
            min: policy::HASH_MIN_LEN,
        });
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = current_hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a candidate password against a stored hash.
///
/// Returns `Ok(false)` for a well-formed hash that does not match, and
/// [`PasswordError::VerificationFailed`] for a hash that is not a valid
/// Argon2 PHC string. The comparison is constant-time in the candidate
/// password via the underlying verifier.
pub fn verify_password(password: &str, hash: &str) -> PasswordResult<bool> {
    if password.is_empty() || hash.is_empty() {
        return Err(PasswordError::MissingInput);
    }

    let parsed =
        PasswordHash::new(hash).map_err(|e| PasswordError::VerificationFailed(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

/// Whether a stored hash should be recomputed after the next successful
/// login.
///
/// True for hashes that cannot be parsed at all (treated as needing an
/// upgrade rather than an error, for compatibility with existing credential
/// rows), for hashes produced by another algorithm, and for hashes whose
/// embedded cost parameters are below the current targets.
pub fn needs_rehash(hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return true;
    };

    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return true;
    }

    let Ok(params) = Params::try_from(&parsed) else {
        return true;
    };

    params.m_cost() < policy::MEMORY_COST_KIB
        || params.t_cost() < policy::TIME_COST
        || params.p_cost() < policy::PARALLELISM
}
