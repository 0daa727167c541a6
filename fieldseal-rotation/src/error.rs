//! Error types for the rotation engine.

use fieldseal_crypto::CryptoError;
use thiserror::Error;

/// Result type for rotation operations.
pub type RotationResult<T> = Result<T, RotationError>;

/// Errors that can occur while migrating encrypted fields.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The input is not recognizable as a serialized encrypted field.
    #[error("value is not an encrypted field")]
    InvalidFormat,

    /// A named field failed to migrate during record migration. The whole
    /// record migration aborts; no partial result is returned.
    #[error("migration failed for field '{field}': {source}")]
    FieldMigration {
        field: String,
        #[source]
        source: CryptoError,
    },

    /// Underlying crypto failure during a single-field migration.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
