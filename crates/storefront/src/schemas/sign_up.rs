//! Registration schema for the three-step sign-up wizard.
//!
//! The schema is a statically declared field-to-validator table, one entry
//! per field, each tagged with the wizard step it belongs to. Step-level
//! validation is a pure filter over the full table; final submission runs
//! every rule and, on success, produces the typed [`SignUpPayload`] the
//! backend wrapper sends.

use serde::{Deserialize, Serialize};

use botica_core::{EntityKind, TaxId};

use crate::backend::types::SignUpPayload;
use crate::schemas::{FieldErrors, email_shape, min_len, password, required};
use crate::wizard::WizardStep;

/// Raw string field values of the in-progress registration.
///
/// Everything is kept as entered so that navigating between steps never
/// loses or reformats input; typing happens only when a rule accepts the
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpDraft {
    pub company: String,
    pub tax_id: String,
    pub entity: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
    pub locality: String,
    pub latitude: String,
    pub longitude: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// One field's validation rule, tagged with its wizard step.
pub struct FieldRule {
    /// Form field name, also the key in [`FieldErrors`].
    pub field: &'static str,
    /// The wizard step this field is collected on.
    pub step: WizardStep,
    /// Pure check against the draft; `Err` carries the display message.
    pub check: fn(&SignUpDraft) -> Result<(), String>,
}

/// The full sign-up schema, enumerated per wizard step.
pub static RULES: &[FieldRule] = &[
    // Step 1 - entity identity
    FieldRule {
        field: "company",
        step: WizardStep::One,
        check: |d| required(&d.company, "Enter the company name."),
    },
    FieldRule {
        field: "tax_id",
        step: WizardStep::One,
        check: |d| {
            TaxId::parse(&d.tax_id)
                .map(|_| ())
                .map_err(|_| "Enter a valid NIF of at least 10 characters.".to_string())
        },
    },
    FieldRule {
        field: "entity",
        step: WizardStep::One,
        check: |d| {
            d.entity
                .parse::<EntityKind>()
                .map(|_| ())
                .map_err(|_| "Choose pharmacy or deposit.".to_string())
        },
    },
    // Step 2 - address and location
    FieldRule {
        field: "city",
        step: WizardStep::Two,
        check: |d| min_len(&d.city, 3, "Enter the city name."),
    },
    FieldRule {
        field: "street",
        step: WizardStep::Two,
        check: |d| required(&d.street, "Enter the street."),
    },
    FieldRule {
        field: "street_number",
        step: WizardStep::Two,
        check: |d| parse_integer(&d.street_number, "Enter the street number."),
    },
    FieldRule {
        field: "locality",
        step: WizardStep::Two,
        check: |d| required(&d.locality, "Describe the locality."),
    },
    FieldRule {
        field: "latitude",
        step: WizardStep::Two,
        check: |d| parse_coordinate(&d.latitude),
    },
    FieldRule {
        field: "longitude",
        step: WizardStep::Two,
        check: |d| parse_coordinate(&d.longitude),
    },
    // Step 3 - contact and credentials
    FieldRule {
        field: "phone",
        step: WizardStep::Three,
        check: |d| parse_phone(&d.phone),
    },
    FieldRule {
        field: "email",
        step: WizardStep::Three,
        check: |d| email_shape(&d.email),
    },
    FieldRule {
        field: "password",
        step: WizardStep::Three,
        check: |d| password(&d.password),
    },
];

/// Validate only the fields belonging to `step`.
///
/// An empty map means the step is accepted.
#[must_use]
pub fn validate_step(draft: &SignUpDraft, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in RULES.iter().filter(|r| r.step == step) {
        if let Err(message) = (rule.check)(draft) {
            errors.insert(rule.field.to_string(), message);
        }
    }
    errors
}

/// Validate the whole accumulated record and build the typed payload.
///
/// # Errors
///
/// Returns the full field-to-message map if any rule rejects.
pub fn validate(draft: &SignUpDraft) -> Result<SignUpPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    for rule in RULES {
        if let Err(message) = (rule.check)(draft) {
            errors.insert(rule.field.to_string(), message);
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // Every rule passed, so these conversions cannot fail; fall back to
    // the error map rather than panicking if the schema and payload ever
    // drift apart.
    let entity = draft
        .entity
        .parse::<EntityKind>()
        .map_err(|e| single_error("entity", e))?;
    let street_number = draft
        .street_number
        .trim()
        .parse::<i64>()
        .map_err(|e| single_error("street_number", e.to_string()))?;
    let latitude = draft
        .latitude
        .trim()
        .parse::<f64>()
        .map_err(|e| single_error("latitude", e.to_string()))?;
    let longitude = draft
        .longitude
        .trim()
        .parse::<f64>()
        .map_err(|e| single_error("longitude", e.to_string()))?;
    let phone = draft
        .phone
        .trim()
        .parse::<i64>()
        .map_err(|e| single_error("phone", e.to_string()))?;

    Ok(SignUpPayload {
        company: draft.company.trim().to_owned(),
        tax_id: draft.tax_id.trim().to_owned(),
        entity,
        city: draft.city.trim().to_owned(),
        street: draft.street.trim().to_owned(),
        street_number,
        locality: draft.locality.trim().to_owned(),
        latitude,
        longitude,
        phone,
        email: draft.email.trim().to_owned(),
        password: draft.password.clone(),
    })
}

fn single_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.into());
    errors
}

/// Fail-closed integer parse: missing or unparseable input is rejected.
fn parse_integer(value: &str, message: &str) -> Result<(), String> {
    value
        .trim()
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| message.to_string())
}

/// Fail-closed coordinate parse: must be a finite number.
fn parse_coordinate(value: &str) -> Result<(), String> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Enter a valid coordinate.".to_string()),
    }
}

/// Fail-closed phone parse: digits only, at least nine of them.
fn parse_phone(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.len() >= 9 && trimmed.parse::<i64>().is_ok() {
        Ok(())
    } else {
        Err("Enter a valid phone number.".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_draft() -> SignUpDraft {
        SignUpDraft {
            company: "Farmacia Central".to_string(),
            tax_id: "5417012345".to_string(),
            entity: "pharmacy".to_string(),
            city: "Luanda".to_string(),
            street: "Rua Amilcar Cabral".to_string(),
            street_number: "10".to_string(),
            locality: "Maianga".to_string(),
            latitude: "-8.838".to_string(),
            longitude: "13.234".to_string(),
            phone: "923000111".to_string(),
            email: "geral@central.ao".to_string(),
            password: "secreta1".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_produces_typed_payload() {
        let payload = validate(&full_draft()).unwrap();
        assert_eq!(payload.entity, EntityKind::Pharmacy);
        assert_eq!(payload.street_number, 10);
        assert!((payload.latitude - (-8.838)).abs() < f64::EPSILON);
        assert_eq!(payload.phone, 923_000_111);
    }

    #[test]
    fn test_step_validation_only_checks_that_step() {
        // A draft with only step-1 fields filled passes step 1 even
        // though steps 2 and 3 are empty.
        let draft = SignUpDraft {
            company: "Depomed".to_string(),
            tax_id: "5417012345".to_string(),
            entity: "deposit".to_string(),
            ..SignUpDraft::default()
        };
        assert!(validate_step(&draft, WizardStep::One).is_empty());
        assert!(!validate_step(&draft, WizardStep::Two).is_empty());
    }

    #[test]
    fn test_empty_company_rejected_with_message() {
        let draft = SignUpDraft {
            company: String::new(),
            ..full_draft()
        };
        let errors = validate_step(&draft, WizardStep::One);
        let message = errors.get("company").unwrap();
        assert!(!message.is_empty());
    }

    #[test]
    fn test_short_nif_rejected() {
        let draft = SignUpDraft {
            tax_id: "123456789".to_string(),
            ..full_draft()
        };
        assert!(validate_step(&draft, WizardStep::One).contains_key("tax_id"));
    }

    #[test]
    fn test_entity_must_be_one_of_two_variants() {
        let draft = SignUpDraft {
            entity: "courier".to_string(),
            ..full_draft()
        };
        assert!(validate_step(&draft, WizardStep::One).contains_key("entity"));
    }

    #[test]
    fn test_numeric_fields_fail_closed() {
        let draft = SignUpDraft {
            street_number: String::new(),
            latitude: "not-a-number".to_string(),
            phone: "92 30 00".to_string(),
            ..full_draft()
        };
        let errors = validate(&draft).unwrap_err();
        assert!(errors.contains_key("street_number"));
        assert!(errors.contains_key("latitude"));
        assert!(errors.contains_key("phone"));
    }

    #[test]
    fn test_email_without_tld_rejected() {
        let draft = SignUpDraft {
            email: "user@domain".to_string(),
            ..full_draft()
        };
        assert!(validate_step(&draft, WizardStep::Three).contains_key("email"));

        let draft = SignUpDraft {
            email: "user@domain.com".to_string(),
            ..full_draft()
        };
        assert!(!validate_step(&draft, WizardStep::Three).contains_key("email"));
    }

    #[test]
    fn test_short_password_rejected() {
        let draft = SignUpDraft {
            password: "12345".to_string(),
            ..full_draft()
        };
        assert!(validate_step(&draft, WizardStep::Three).contains_key("password"));
    }

    #[test]
    fn test_validation_has_no_side_effects() {
        let draft = full_draft();
        let before = draft.clone();
        let _ = validate(&draft);
        let _ = validate_step(&draft, WizardStep::Two);
        assert_eq!(draft, before);
    }
}
