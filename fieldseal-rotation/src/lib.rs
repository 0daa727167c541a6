//! Key rotation and migration for FieldSeal.
//!
//! Re-encrypts stored fields from old key versions to the current one so old
//! keys can eventually be retired:
//!
//! - [`RotationEngine`]: per-field and per-record re-encryption, plus the
//!   `needs_key_rotation` predicate for finding stale records
//! - [`MigrationProgress`]: immutable, persistable snapshots that make a
//!   multi-batch migration resumable after a crash
//!
//! The engine only transforms values; reading records from storage and
//! writing migrated fields back is the driving script's job.

mod error;
mod migrate;
mod progress;

pub use error::{RotationError, RotationResult};
pub use migrate::RotationEngine;
pub use progress::{MigrationFailure, MigrationProgress};
