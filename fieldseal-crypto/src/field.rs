//! Serialized form of encrypted fields.
//!
//! A [`FieldCodec`] wraps the cipher and turns payloads into the one string
//! shape that crosses the subsystem boundary to storage: a JSON object with
//! exactly the keys `keyVersion`, `iv`, `authTag`, and `ciphertext`, the
//! binary parts base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::cipher::{EncryptedPayload, FieldCipher, NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::registry::KeyVersion;

/// Wire shape of one encrypted field. Unknown keys are rejected so the
/// "exactly four keys" rule holds in both directions.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FieldEnvelope {
    key_version: KeyVersion,
    iv: String,
    auth_tag: String,
    ciphertext: String,
}

impl FieldEnvelope {
    fn from_payload(payload: &EncryptedPayload) -> Self {
        Self {
            key_version: payload.key_version,
            iv: STANDARD.encode(payload.nonce),
            auth_tag: STANDARD.encode(payload.auth_tag),
            ciphertext: STANDARD.encode(&payload.ciphertext),
        }
    }

    fn into_payload(self) -> CryptoResult<EncryptedPayload> {
        let nonce = decode_fixed::<NONCE_SIZE>(&self.iv, "iv")?;
        let auth_tag = decode_fixed::<TAG_SIZE>(&self.auth_tag, "authTag")?;
        let ciphertext = STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| CryptoError::MalformedPayload(format!("ciphertext: {}", e)))?;

        Ok(EncryptedPayload {
            key_version: self.key_version,
            nonce,
            auth_tag,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(encoded: &str, field: &str) -> CryptoResult<[u8; N]> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| CryptoError::MalformedPayload(format!("{}: {}", field, e)))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CryptoError::MalformedPayload(format!(
            "{}: expected {} bytes, got {}",
            field,
            N,
            b.len()
        ))
    })
}

/// Serializes and deserializes encrypted fields around a [`FieldCipher`].
#[derive(Clone)]
pub struct FieldCodec {
    cipher: FieldCipher,
}

impl FieldCodec {
    /// Creates a codec over a cipher.
    pub fn new(cipher: FieldCipher) -> Self {
        Self { cipher }
    }

    /// The cipher this codec wraps.
    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }

    /// Encrypts a field value under the current key and serializes it.
    pub fn encrypt_field(&self, plaintext: &str) -> CryptoResult<String> {
        let payload = self.cipher.encrypt(plaintext, None)?;
        self.serialize(&payload)
    }

    /// Encrypts a field value under a specific key version and serializes it.
    /// Used by the rotation engine to re-wrap data under a target version.
    pub fn encrypt_field_with(&self, plaintext: &str, version: KeyVersion) -> CryptoResult<String> {
        let payload = self.cipher.encrypt(plaintext, Some(version))?;
        self.serialize(&payload)
    }

    /// Parses a serialized field and decrypts it.
    pub fn decrypt_field(&self, serialized: &str) -> CryptoResult<String> {
        let payload = self.deserialize(serialized)?;
        self.cipher.decrypt(&payload)
    }

    /// Serializes a payload to its JSON wire form.
    pub fn serialize(&self, payload: &EncryptedPayload) -> CryptoResult<String> {
        Ok(serde_json::to_string(&FieldEnvelope::from_payload(payload))?)
    }

    /// Parses the JSON wire form back into a payload.
    pub fn deserialize(&self, serialized: &str) -> CryptoResult<EncryptedPayload> {
        let envelope: FieldEnvelope = serde_json::from_str(serialized)
            .map_err(|e| CryptoError::MalformedPayload(e.to_string()))?;
        envelope.into_payload()
    }

    /// Reads the embedded key version without decrypting — payload metadata
    /// for rotation decisions.
    pub fn key_version_of(&self, serialized: &str) -> CryptoResult<KeyVersion> {
        let envelope: FieldEnvelope = serde_json::from_str(serialized)
            .map_err(|e| CryptoError::MalformedPayload(e.to_string()))?;
        Ok(envelope.key_version)
    }

    /// Cheap structural check: does this string look like a serialized
    /// encrypted field? Lets callers tell legacy plaintext columns apart
    /// from migrated ciphertext without attempting decryption. Never errors
    /// on garbage input.
    pub fn is_encrypted(value: &str) -> bool {
        serde_json::from_str::<FieldEnvelope>(value).is_ok()
    }
}
