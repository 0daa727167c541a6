//! Tunable password policy constants.
//!
//! The hashing minimum and the strength validator's minimum are deliberately
//! two constants even though they agree today: the hasher's floor is a hard
//! input guard, the validator's is user-facing policy, and they may diverge.

/// Minimum length `hash_password` will accept.
pub const HASH_MIN_LEN: usize = 8;

/// Minimum length the strength validator requires.
pub const STRENGTH_MIN_LEN: usize = 8;

/// Maximum length the strength validator allows.
pub const STRENGTH_MAX_LEN: usize = 128;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?";

/// Current Argon2id cost targets. Raising any of these makes existing hashes
/// report [`crate::needs_rehash`] so they are upgraded on next login.
///
/// Values follow the OWASP recommendation for Argon2id: 19 MiB memory,
/// 2 iterations, 1 lane.
pub const MEMORY_COST_KIB: u32 = 19 * 1024;
pub const TIME_COST: u32 = 2;
pub const PARALLELISM: u32 = 1;
