//! Sign-in form schema.

use serde::Deserialize;

use crate::schemas::{FieldErrors, email_shape, password};

/// Raw sign-in form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Validate the sign-in form before any network call.
///
/// # Errors
///
/// Returns the field-to-message map if either field rejects.
pub fn validate(form: &SignInForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(message) = email_shape(&form.email) {
        errors.insert("email".to_string(), message);
    }
    if let Err(message) = password(&form.password) {
        errors.insert("password".to_string(), message);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_credentials() {
        let form = SignInForm {
            email: "user@domain.com".to_string(),
            password: "secreta1".to_string(),
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_rejects_email_without_tld() {
        let form = SignInForm {
            email: "user@domain".to_string(),
            password: "secreta1".to_string(),
        };
        let errors = validate(&form).unwrap_err();
        assert!(errors.contains_key("email"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_rejects_short_password() {
        let form = SignInForm {
            email: "user@domain.com".to_string(),
            password: "123".to_string(),
        };
        assert!(validate(&form).unwrap_err().contains_key("password"));
    }
}
