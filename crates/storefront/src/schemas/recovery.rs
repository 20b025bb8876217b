//! Credential recovery form schema.

use serde::Deserialize;

use crate::schemas::{FieldErrors, email_shape};

/// Raw recovery form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoveryForm {
    pub email: String,
}

/// Validate the recovery form before requesting the recovery email.
///
/// # Errors
///
/// Returns the field-to-message map if the email shape rejects.
pub fn validate(form: &RecoveryForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(message) = email_shape(&form.email) {
        errors.insert("email".to_string(), message);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_registered_email_shape() {
        let form = RecoveryForm {
            email: "user@domain.com".to_string(),
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_rejects_missing_email() {
        let form = RecoveryForm {
            email: String::new(),
        };
        assert!(validate(&form).unwrap_err().contains_key("email"));
    }
}
