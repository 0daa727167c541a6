//! Error types for password hashing.

use thiserror::Error;

/// Result type for password operations.
pub type PasswordResult<T> = Result<T, PasswordError>;

/// Errors that can occur when hashing or verifying passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The password was empty or whitespace-only.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The password is below the minimum length accepted for hashing.
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },

    /// Verification was called with an empty password or empty hash.
    /// Distinct from a wrong password, which verifies to `false`.
    #[error("password and hash are both required for verification")]
    MissingInput,

    /// The stored hash is not a well-formed hash for the supported
    /// algorithm. A well-formed hash that simply does not match returns
    /// `false` instead.
    #[error("password verification failed: {0}")]
    VerificationFailed(String),

    /// Hashing itself failed in the underlying KDF.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
