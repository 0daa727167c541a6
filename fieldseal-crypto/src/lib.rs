//! Field-level authenticated encryption for FieldSeal.
//!
//! Protects sensitive record fields (emails, addresses, payment metadata) at
//! rest with ChaCha20-Poly1305, using versioned keys so the active key can be
//! rotated without downtime or data loss:
//!
//! - [`KeyRegistry`]: versioned symmetric keys, one current, older ones
//!   deprecatable for decrypt-only use
//! - [`FieldCipher`]: authenticated encryption of single field values, key
//!   version bound as AAD
//! - [`FieldCodec`]: the JSON wire envelope that crosses the boundary to
//!   storage, plus the `is_encrypted` predicate
//!
//! This crate never touches storage or transport; it takes plain strings in
//! and hands serialized ciphertext back.

mod cipher;
mod error;
mod field;
mod registry;

pub use cipher::{EncryptedPayload, FieldCipher, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use field::FieldCodec;
pub use registry::{FieldKey, KeyRegistry, KeyVersion, KEY_SIZE};
