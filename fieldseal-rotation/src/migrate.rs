//! Re-encryption of stored fields from old key versions to a target version.
//!
//! The engine reads and writes the same serialized envelope as the field
//! codec, so migrated values are indistinguishable from freshly encrypted
//! ones. Plaintext exists only inside the re-encryption call; the engine
//! never returns or logs it.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use fieldseal_crypto::{FieldCipher, FieldCodec, KeyRegistry, KeyVersion};

use crate::error::{RotationError, RotationResult};

/// Rewraps encrypted fields under a new key version.
#[derive(Clone)]
pub struct RotationEngine {
    registry: Arc<KeyRegistry>,
    codec: FieldCodec,
}

impl RotationEngine {
    /// Creates an engine over the shared key registry.
    pub fn new(registry: Arc<KeyRegistry>) -> Self {
        let codec = FieldCodec::new(FieldCipher::new(registry.clone()));
        Self { registry, codec }
    }

    /// The codec this engine re-encrypts through.
    pub fn codec(&self) -> &FieldCodec {
        &self.codec
    }

    /// Re-encrypts one serialized field under `target` (the registry's
    /// current version when none is given).
    ///
    /// Idempotent: a field already at the target version is returned
    /// unchanged, so re-running a migration over already-migrated rows is
    /// always safe and cheap. Either a fully valid new envelope is returned
    /// or an error is raised; there is no partial output.
    pub fn migrate_field(
        &self,
        serialized: &str,
        target: Option<KeyVersion>,
    ) -> RotationResult<String> {
        if !FieldCodec::is_encrypted(serialized) {
            return Err(RotationError::InvalidFormat);
        }

        let target = target.unwrap_or_else(|| self.registry.current_version());
        let embedded = self.codec.key_version_of(serialized)?;
        if embedded == target {
            return Ok(serialized.to_string());
        }

        let plaintext = self.codec.decrypt_field(serialized)?;
        let migrated = self.codec.encrypt_field_with(&plaintext, target)?;
        debug!(from = %embedded, to = %target, "re-encrypted field");
        Ok(migrated)
    }

    /// Migrates the named fields of one record, returning only the fields
    /// that were actually re-encrypted.
    ///
    /// Absent, null, non-string, and non-encrypted values are skipped — they
    /// are legitimate states mid-migration, not failures. The first field
    /// that fails aborts the whole record with the offending field named;
    /// callers retry or skip the record as a unit.
    pub fn migrate_record(
        &self,
        record: &Map<String, Value>,
        field_names: &[&str],
        target: Option<KeyVersion>,
    ) -> RotationResult<Map<String, Value>> {
        let mut migrated = Map::new();

        for &field in field_names {
            let Some(Value::String(value)) = record.get(field) else {
                continue;
            };
            if !FieldCodec::is_encrypted(value) {
                debug!(field, "skipping non-encrypted field");
                continue;
            }

            match self.migrate_field(value, target) {
                Ok(rewrapped) => {
                    migrated.insert(field.to_string(), Value::String(rewrapped));
                }
                Err(RotationError::Crypto(source)) => {
                    return Err(RotationError::FieldMigration {
                        field: field.to_string(),
                        source,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(migrated)
    }

    /// True if any named field is encrypted under a key version the registry
    /// has marked deprecated. Malformed fields are not this predicate's
    /// problem and report `false`.
    pub fn needs_key_rotation(&self, record: &Map<String, Value>, field_names: &[&str]) -> bool {
        field_names.iter().any(|&field| {
            let Some(Value::String(value)) = record.get(field) else {
                return false;
            };
            if !FieldCodec::is_encrypted(value) {
                return false;
            }
            self.codec
                .key_version_of(value)
                .map(|version| self.registry.is_deprecated(version))
                .unwrap_or(false)
        })
    }
}
