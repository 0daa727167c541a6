//! Password strength validation.

use crate::policy;

/// Outcome of a strength check. `valid` is true iff `messages` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrengthReport {
    pub valid: bool,
    pub messages: Vec<String>,
}

/// Checks a candidate password against the full rule set, accumulating every
/// violation instead of stopping at the first so the caller can show the
/// user everything that needs fixing at once.
pub fn validate_password_strength(password: &str) -> StrengthReport {
    let mut messages = Vec::new();
    let len = password.chars().count();

    if len < policy::STRENGTH_MIN_LEN {
        messages.push(format!(
            "Password must be at least {} characters long",
            policy::STRENGTH_MIN_LEN
        ));
    }
    if len > policy::STRENGTH_MAX_LEN {
        messages.push(format!(
            "Password must be at most {} characters long",
            policy::STRENGTH_MAX_LEN
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        messages.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        messages.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        messages.push("Password must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| policy::SPECIAL_CHARS.contains(c)) {
        messages.push("Password must contain at least one special character".to_string());
    }

    StrengthReport {
        valid: messages.is_empty(),
        messages,
    }
}
