//! Versioned key management.
//!
//! The registry holds every symmetric key the process is allowed to use,
//! tagged with a monotonically increasing version. Exactly one version is
//! "current" and is used for all new encryptions; older versions may be
//! marked deprecated so they are only ever used to decrypt legacy data.
//!
//! Key material is supplied by an external secrets provider at startup; the
//! registry never loads, persists, or deletes keys itself.

use std::collections::{BTreeMap, BTreeSet};

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// Size of field encryption keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// Version tag identifying which symmetric key encrypted a payload.
///
/// Versions start at 1 and are assigned monotonically, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyVersion(u32);

impl KeyVersion {
    /// Creates a key version. The registry rejects version 0 at insert time.
    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    /// Returns the raw version number.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A symmetric field encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FieldKey {
    bytes: [u8; KEY_SIZE],
}

impl FieldKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses a key from the base64 form handed over by a secrets provider.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidRegistry(format!("invalid key base64: {}", e)))?;
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidRegistry(format!(
                "invalid key length: expected {}, got {}",
                KEY_SIZE,
                b.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Generates a random key (provisioning and tests).
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Read-mostly registry of versioned keys.
///
/// Populated once at startup from the external secrets provider, then shared
/// behind an `Arc` by the cipher and the rotation engine. Deprecation marks
/// are the only mutation the subsystem itself ever performs, and keys are
/// never removed here: retiring key material is an out-of-band operation.
pub struct KeyRegistry {
    keys: BTreeMap<KeyVersion, FieldKey>,
    current: KeyVersion,
    deprecated: BTreeSet<KeyVersion>,
}

impl KeyRegistry {
    /// Builds a registry from provisioned keys.
    ///
    /// Fails if `keys` is empty, contains version 0 or duplicate versions,
    /// or does not contain `current`.
    pub fn new(keys: Vec<(KeyVersion, FieldKey)>, current: KeyVersion) -> CryptoResult<Self> {
        if keys.is_empty() {
            return Err(CryptoError::InvalidRegistry("no keys provisioned".into()));
        }

        let mut map = BTreeMap::new();
        for (version, key) in keys {
            if version.get() == 0 {
                return Err(CryptoError::InvalidRegistry(
                    "key versions start at 1".into(),
                ));
            }
            if map.insert(version, key).is_some() {
                return Err(CryptoError::InvalidRegistry(format!(
                    "duplicate key version {}",
                    version
                )));
            }
        }

        if !map.contains_key(&current) {
            return Err(CryptoError::InvalidRegistry(format!(
                "current version {} is not provisioned",
                current
            )));
        }

        Ok(Self {
            keys: map,
            current,
            deprecated: BTreeSet::new(),
        })
    }

    /// Convenience constructor for a single-key registry at version 1.
    pub fn with_single_key(key: FieldKey) -> Self {
        let version = KeyVersion::new(1);
        Self {
            keys: BTreeMap::from([(version, key)]),
            current: version,
            deprecated: BTreeSet::new(),
        }
    }

    /// The version used for all new encryptions.
    pub fn current_version(&self) -> KeyVersion {
        self.current
    }

    /// Resolves the key for a given version.
    pub fn key_for(&self, version: KeyVersion) -> CryptoResult<&FieldKey> {
        self.keys
            .get(&version)
            .ok_or(CryptoError::UnknownKeyVersion(version))
    }

    /// True for versions retained only to decrypt legacy data.
    pub fn is_deprecated(&self, version: KeyVersion) -> bool {
        self.deprecated.contains(&version)
    }

    /// Provisions a new key. The version must be strictly greater than every
    /// existing one: versions are never reused.
    pub fn add_key(&mut self, version: KeyVersion, key: FieldKey) -> CryptoResult<()> {
        let max = *self.keys.keys().next_back().expect("registry is never empty");
        if version <= max {
            return Err(CryptoError::InvalidRegistry(format!(
                "version {} is not above the latest provisioned version {}",
                version, max
            )));
        }
        self.keys.insert(version, key);
        Ok(())
    }

    /// Makes `version` the one used for new encryptions.
    pub fn set_current(&mut self, version: KeyVersion) -> CryptoResult<()> {
        if !self.keys.contains_key(&version) {
            return Err(CryptoError::UnknownKeyVersion(version));
        }
        self.deprecated.remove(&version);
        self.current = version;
        Ok(())
    }

    /// Marks an old version as deprecated. The current version cannot be
    /// deprecated.
    pub fn mark_deprecated(&mut self, version: KeyVersion) -> CryptoResult<()> {
        if !self.keys.contains_key(&version) {
            return Err(CryptoError::UnknownKeyVersion(version));
        }
        if version == self.current {
            return Err(CryptoError::InvalidRegistry(format!(
                "cannot deprecate the current version {}",
                version
            )));
        }
        self.deprecated.insert(version);
        Ok(())
    }

    /// All provisioned versions, oldest first.
    pub fn versions(&self) -> Vec<KeyVersion> {
        self.keys.keys().copied().collect()
    }
}

impl std::fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("versions", &self.versions())
            .field("current", &self.current)
            .field("deprecated", &self.deprecated)
            .finish()
    }
}
