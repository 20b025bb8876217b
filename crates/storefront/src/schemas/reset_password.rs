//! Password reset form schema (old password plus new password).

use serde::Deserialize;

use crate::schemas::{FieldErrors, password};

/// Raw reset form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordForm {
    pub old_password: String,
    pub new_password: String,
}

/// Validate the reset form before submission: both passwords must meet
/// the minimum length.
///
/// # Errors
///
/// Returns the field-to-message map if either password rejects.
pub fn validate(form: &ResetPasswordForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(message) = password(&form.old_password) {
        errors.insert("old_password".to_string(), message);
    }
    if let Err(message) = password(&form.new_password) {
        errors.insert("new_password".to_string(), message);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
