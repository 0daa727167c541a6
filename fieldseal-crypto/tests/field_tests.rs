use std::sync::Arc;

use pretty_assertions::assert_eq;

use fieldseal_crypto::{
    CryptoError, FieldCipher, FieldCodec, FieldKey, KeyRegistry, KeyVersion,
};

fn codec() -> FieldCodec {
    let registry = KeyRegistry::with_single_key(FieldKey::generate());
    FieldCodec::new(FieldCipher::new(Arc::new(registry)))
}

#[test]
fn encrypt_field_decrypt_field_roundtrip() {
    let codec = codec();
    let serialized = codec.encrypt_field("billing@acme.com").unwrap();
    assert_eq!(codec.decrypt_field(&serialized).unwrap(), "billing@acme.com");
}

#[test]
fn serialized_form_has_exactly_four_keys() {
    let codec = codec();
    let serialized = codec.encrypt_field("value").unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&serialized).unwrap();
    let object = parsed.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object["keyVersion"].is_number());
    assert!(object["iv"].is_string());
    assert!(object["authTag"].is_string());
    assert!(object["ciphertext"].is_string());
}

#[test]
fn payload_serialization_roundtrips_exactly() {
    let codec = codec();
    let payload = codec.cipher().encrypt("round trip me", None).unwrap();
    let serialized = codec.serialize(&payload).unwrap();
    assert_eq!(codec.deserialize(&serialized).unwrap(), payload);
}

#[test]
fn empty_plaintext_is_rejected() {
    let codec = codec();
    assert!(matches!(
        codec.encrypt_field(""),
        Err(CryptoError::EmptyPlaintext)
    ));
}

#[test]
fn key_version_of_reads_embedded_version() {
    let codec = codec();
    let serialized = codec.encrypt_field("value").unwrap();
    assert_eq!(
        codec.key_version_of(&serialized).unwrap(),
        KeyVersion::new(1)
    );
}

// ── malformed input ──────────────────────────────────────────────

#[test]
fn invalid_json_is_malformed() {
    let codec = codec();
    assert!(matches!(
        codec.decrypt_field("{not json"),
        Err(CryptoError::MalformedPayload(_))
    ));
}

#[test]
fn missing_key_is_malformed() {
    let codec = codec();
    let input = r#"{"keyVersion":1,"iv":"AAAA","ciphertext":"AAAA"}"#;
    assert!(matches!(
        codec.decrypt_field(input),
        Err(CryptoError::MalformedPayload(_))
    ));
}

#[test]
fn invalid_base64_is_malformed() {
    let codec = codec();
    let input = r#"{"keyVersion":1,"iv":"***","authTag":"AAAA","ciphertext":"AAAA"}"#;
    assert!(matches!(
        codec.decrypt_field(input),
        Err(CryptoError::MalformedPayload(_))
    ));
}

#[test]
fn wrong_length_nonce_is_malformed() {
    let codec = codec();
    // "AAAA" decodes to 3 bytes; the nonce must be 12.
    let input = r#"{"keyVersion":1,"iv":"AAAA","authTag":"AAAA","ciphertext":"AAAA"}"#;
    assert!(matches!(
        codec.decrypt_field(input),
        Err(CryptoError::MalformedPayload(_))
    ));
}

// ── is_encrypted ─────────────────────────────────────────────────

#[test]
fn is_encrypted_accepts_codec_output() {
    let codec = codec();
    let serialized = codec.encrypt_field("value").unwrap();
    assert!(FieldCodec::is_encrypted(&serialized));
}

#[test]
fn is_encrypted_rejects_plaintext_and_garbage() {
    assert!(!FieldCodec::is_encrypted("billing@acme.com"));
    assert!(!FieldCodec::is_encrypted(""));
    assert!(!FieldCodec::is_encrypted("{}"));
    assert!(!FieldCodec::is_encrypted("null"));
    assert!(!FieldCodec::is_encrypted("[1,2,3]"));
    assert!(!FieldCodec::is_encrypted("\u{0}\u{1}\u{2}"));
}

#[test]
fn is_encrypted_rejects_missing_and_extra_keys() {
    assert!(!FieldCodec::is_encrypted(
        r#"{"keyVersion":1,"iv":"AAAA","authTag":"AAAA"}"#
    ));
    assert!(!FieldCodec::is_encrypted(
        r#"{"keyVersion":1,"iv":"A","authTag":"A","ciphertext":"A","extra":1}"#
    ));
}
