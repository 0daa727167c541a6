//! Adaptive password hashing for FieldSeal.
//!
//! Credentials are stored as Argon2id PHC strings. The crate covers the
//! whole credential lifecycle an authentication flow needs:
//!
//! - [`hash_password`] / [`verify_password`] with constant-time comparison
//! - [`needs_rehash`] to upgrade weak hashes opportunistically on login
//! - [`validate_password_strength`] for user-facing policy feedback
//!
//! Cost targets and length policy live in [`policy`] and can be tuned
//! independently; existing hashes are never invalidated by a tune, they are
//! rehashed on the user's next successful login.

mod error;
mod hasher;
pub mod policy;
mod strength;

pub use error::{PasswordError, PasswordResult};
pub use hasher::{hash_password, needs_rehash, verify_password};
pub use strength::{validate_password_strength, StrengthReport};
