//! Error types for the field encryption layer.

use thiserror::Error;

use crate::registry::KeyVersion;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in field encryption operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption was asked to protect an empty value. Callers must not
    /// encrypt absent/nullable fields.
    #[error("plaintext must not be empty")]
    EmptyPlaintext,

    /// The requested key version was never provisioned in the registry.
    #[error("unknown key version: {0}")]
    UnknownKeyVersion(KeyVersion),

    /// A serialized field could not be parsed into an encrypted payload.
    #[error("malformed encrypted payload: {0}")]
    MalformedPayload(String),

    /// Authentication failed: tampered ciphertext, tampered nonce or tag,
    /// or the wrong key. Intentionally carries no further detail.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Encryption itself failed in the underlying AEAD.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Key registry construction or mutation violated an invariant.
    #[error("invalid key registry: {0}")]
    InvalidRegistry(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
