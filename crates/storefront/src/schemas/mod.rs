//! Client-side validation schemas.
//!
//! Each schema is a pure, declarative description of per-field rules:
//! given a candidate record it produces either an accepted (typed) result
//! or a mapping from field name to a human-readable rejection reason.
//! Validation never has side effects and always runs before any network
//! call. Numeric fields fail closed: missing or unparseable input is
//! rejected rather than defaulted to zero.

pub mod recovery;
pub mod reset_password;
pub mod sign_in;
pub mod sign_up;

use std::collections::BTreeMap;

/// Field name to rejection reason, ordered for stable rendering.
pub type FieldErrors = BTreeMap<String, String>;

/// Minimum password length across every credential form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Shared field checks
// =============================================================================

/// Reject empty (or whitespace-only) input.
pub(crate) fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Reject input shorter than `min` characters after trimming.
pub(crate) fn min_len(value: &str, min: usize, message: &str) -> Result<(), String> {
    if value.trim().chars().count() < min {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Reject a password shorter than [`MIN_PASSWORD_LENGTH`].
///
/// Passwords are not trimmed; leading or trailing spaces are legitimate
/// characters.
pub(crate) fn password(value: &str) -> Result<(), String> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        Err(format!(
            "Enter a password of at least {MIN_PASSWORD_LENGTH} characters."
        ))
    } else {
        Ok(())
    }
}

/// Reject input that is not a structurally valid email address.
pub(crate) fn email_shape(value: &str) -> Result<(), String> {
    botica_core::Email::parse(value.trim())
        .map(|_| ())
        .map_err(|_| "Enter a valid e-mail address.".to_string())
}
