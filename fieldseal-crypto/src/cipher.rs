//! Field encryption using ChaCha20-Poly1305.
//!
//! Provides authenticated encryption with associated data (AEAD). The key
//! version is fed in as AAD, so a payload re-labelled with a different
//! version fails authentication instead of decrypting under the wrong key.

use std::sync::Arc;

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};
use crate::registry::{KeyRegistry, KeyVersion};

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// One encrypted field value with everything needed to decrypt it.
///
/// The tag is kept separate from the ciphertext because the wire envelope
/// stores it as its own field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Which registry key produced this payload.
    pub key_version: KeyVersion,
    /// The nonce used for encryption (unique per encryption).
    pub nonce: [u8; NONCE_SIZE],
    /// The Poly1305 authentication tag.
    pub auth_tag: [u8; TAG_SIZE],
    /// The encrypted field value, without the tag.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Total encrypted size in bytes.
    pub fn len(&self) -> usize {
        NONCE_SIZE + TAG_SIZE + self.ciphertext.len()
    }

    /// Returns true if the ciphertext is empty.
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }
}

/// Associated data binding a payload to its key version.
fn version_aad(version: KeyVersion) -> [u8; 4] {
    version.get().to_le_bytes()
}

/// Encrypts and decrypts single field values against a shared key registry.
#[derive(Clone)]
pub struct FieldCipher {
    registry: Arc<KeyRegistry>,
}

impl FieldCipher {
    /// Creates a cipher over a shared registry.
    pub fn new(registry: Arc<KeyRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this cipher resolves keys from.
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Encrypts a field value under `version`, or under the registry's
    /// current version when none is given.
    ///
    /// A fresh random nonce is generated for every call; encrypting the same
    /// value twice never produces the same output. Empty plaintext is a
    /// caller bug and is rejected rather than encrypted.
    pub fn encrypt(
        &self,
        plaintext: &str,
        version: Option<KeyVersion>,
    ) -> CryptoResult<EncryptedPayload> {
        if plaintext.is_empty() {
            return Err(CryptoError::EmptyPlaintext);
        }

        let key_version = version.unwrap_or_else(|| self.registry.current_version());
        let key = self.registry.key_for(key_version)?;

        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let mut sealed = cipher
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &version_aad(key_version),
                },
            )
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        // The AEAD appends the tag to the ciphertext; split it back off.
        let tag_start = sealed.len() - TAG_SIZE;
        let mut auth_tag = [0u8; TAG_SIZE];
        auth_tag.copy_from_slice(&sealed[tag_start..]);
        sealed.truncate(tag_start);

        Ok(EncryptedPayload {
            key_version,
            nonce: nonce_bytes,
            auth_tag,
            ciphertext: sealed,
        })
    }

    /// Decrypts a payload encrypted by [`FieldCipher::encrypt`].
    ///
    /// Fails with [`CryptoError::UnknownKeyVersion`] when the embedded
    /// version was never provisioned, and with the undifferentiated
    /// [`CryptoError::DecryptionFailed`] for every authentication failure —
    /// tampered ciphertext, nonce, or tag, or the wrong key. Callers must
    /// not be able to tell which.
    pub fn decrypt(&self, payload: &EncryptedPayload) -> CryptoResult<String> {
        let key = self.registry.key_for(payload.key_version)?;

        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
        let nonce = Nonce::from_slice(&payload.nonce);

        let mut sealed = Vec::with_capacity(payload.ciphertext.len() + TAG_SIZE);
        sealed.extend_from_slice(&payload.ciphertext);
        sealed.extend_from_slice(&payload.auth_tag);

        let plaintext = cipher
            .decrypt(
                nonce,
                Payload {
                    msg: &sealed,
                    aad: &version_aad(payload.key_version),
                },
            )
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }
}
