//! The three-step sign-up wizard controller.
//!
//! The wizard is an ordinary state machine over [`SignUpDraft`]: a current
//! step, the accumulated field values, and the errors from the last
//! rejected transition. Routes load it from the session, drive one
//! transition, and write it back, so entered data survives every `next`
//! and `previous` and only vanishes on explicit cancellation or a
//! successful final submission.

use serde::{Deserialize, Serialize};

use crate::backend::types::SignUpPayload;
use crate::schemas::FieldErrors;
use crate::schemas::sign_up::{self, SignUpDraft};

/// The wizard's three steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum WizardStep {
    /// Entity identity: company, NIF, entity kind.
    #[default]
    One,
    /// Address and location.
    Two,
    /// Contact and credentials.
    Three,
}

impl WizardStep {
    /// 1-based step number for display.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// The following step, capped at the last.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two | Self::Three => Self::Three,
        }
    }

    /// The preceding step, floored at the first.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::One | Self::Two => Self::One,
            Self::Three => Self::Two,
        }
    }

    /// Whether this is the final step, where submission is reachable.
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Three)
    }
}

/// Field values posted by one wizard form submission.
///
/// Only the active step's inputs are present in the form, so every field
/// is optional; absent fields never overwrite what was entered earlier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftUpdate {
    pub company: Option<String>,
    pub tax_id: Option<String>,
    pub entity: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub locality: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Transient wizard state, round-tripped through the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpWizard {
    step: WizardStep,
    draft: SignUpDraft,
    errors: FieldErrors,
}

impl SignUpWizard {
    /// A fresh wizard at step one with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step currently being displayed.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// The accumulated field values.
    #[must_use]
    pub const fn draft(&self) -> &SignUpDraft {
        &self.draft
    }

    /// Errors from the last rejected transition, keyed by field name.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Merge one form submission into the draft.
    ///
    /// Absent fields are left untouched; this is what preserves values
    /// entered on other steps.
    pub fn absorb(&mut self, update: DraftUpdate) {
        let draft = &mut self.draft;
        merge(&mut draft.company, update.company);
        merge(&mut draft.tax_id, update.tax_id);
        merge(&mut draft.entity, update.entity);
        merge(&mut draft.city, update.city);
        merge(&mut draft.street, update.street);
        merge(&mut draft.street_number, update.street_number);
        merge(&mut draft.locality, update.locality);
        merge(&mut draft.latitude, update.latitude);
        merge(&mut draft.longitude, update.longitude);
        merge(&mut draft.phone, update.phone);
        merge(&mut draft.email, update.email);
        merge(&mut draft.password, update.password);
    }

    /// Try to advance: validate only the active step's fields.
    ///
    /// On success the step advances (capped at three) and old errors are
    /// cleared; on failure the step is unchanged and per-field messages
    /// are recorded for display. Returns whether the wizard advanced.
    pub fn next(&mut self) -> bool {
        let errors = sign_up::validate_step(&self.draft, self.step);
        if errors.is_empty() {
            self.step = self.step.next();
            self.errors.clear();
            true
        } else {
            self.errors = errors;
            false
        }
    }

    /// Go back one step (floored at one). No validation; values kept.
    pub fn previous(&mut self) {
        self.step = self.step.previous();
        self.errors.clear();
    }

    /// Final submission: revalidate the entire accumulated record.
    ///
    /// # Errors
    ///
    /// Returns the full field-to-message map if any field rejects; the
    /// draft is left intact either way.
    pub fn submit(&mut self) -> Result<SignUpPayload, FieldErrors> {
        match sign_up::validate(&self.draft) {
            Ok(payload) => {
                self.errors.clear();
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Record a backend rejection (e.g. duplicate NIF) against a field so
    /// the page can show it without losing entered data.
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }
}

fn merge(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn step_one_update() -> DraftUpdate {
        DraftUpdate {
            company: Some("Farmacia Central".to_string()),
            tax_id: Some("5417012345".to_string()),
            entity: Some("pharmacy".to_string()),
            ..DraftUpdate::default()
        }
    }

    fn step_two_update() -> DraftUpdate {
        DraftUpdate {
            city: Some("Luanda".to_string()),
            street: Some("Rua Amilcar Cabral".to_string()),
            street_number: Some("10".to_string()),
            locality: Some("Maianga".to_string()),
            latitude: Some("-8.838".to_string()),
            longitude: Some("13.234".to_string()),
            ..DraftUpdate::default()
        }
    }

    fn step_three_update() -> DraftUpdate {
        DraftUpdate {
            phone: Some("923000111".to_string()),
            email: Some("geral@central.ao".to_string()),
            password: Some("secreta1".to_string()),
            ..DraftUpdate::default()
        }
    }

    #[test]
    fn test_starts_at_step_one_with_empty_draft() {
        let wizard = SignUpWizard::new();
        assert_eq!(wizard.step(), WizardStep::One);
        assert!(wizard.draft().company.is_empty());
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_invalid_next_stays_and_records_errors() {
        let mut wizard = SignUpWizard::new();
        // Empty company name on step 1.
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::One);

        let message = wizard.errors().get("company").unwrap();
        assert!(!message.is_empty());
    }

    #[test]
    fn test_valid_next_advances_and_clears_errors() {
        let mut wizard = SignUpWizard::new();
        assert!(!wizard.next());
        assert!(!wizard.errors().is_empty());

        wizard.absorb(step_one_update());
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Two);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_next_then_previous_preserves_entered_values() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        assert!(wizard.next());

        let draft_before = wizard.draft().clone();
        wizard.previous();

        assert_eq!(wizard.step(), WizardStep::One);
        assert_eq!(wizard.draft(), &draft_before);
        assert_eq!(wizard.draft().company, "Farmacia Central");
    }

    #[test]
    fn test_previous_is_floored_at_step_one() {
        let mut wizard = SignUpWizard::new();
        wizard.previous();
        assert_eq!(wizard.step(), WizardStep::One);
    }

    #[test]
    fn test_next_is_capped_at_step_three() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        assert!(wizard.next());
        wizard.absorb(step_two_update());
        assert!(wizard.next());
        wizard.absorb(step_three_update());
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Three);
        assert!(wizard.step().is_last());
    }

    #[test]
    fn test_absorb_without_a_field_keeps_previous_value() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        // A later submission that carries no step-1 fields.
        wizard.absorb(step_two_update());
        assert_eq!(wizard.draft().company, "Farmacia Central");
        assert_eq!(wizard.draft().city, "Luanda");
    }

    #[test]
    fn test_submit_builds_payload_from_full_draft() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        wizard.absorb(step_two_update());
        wizard.absorb(step_three_update());

        let payload = wizard.submit().unwrap();
        assert_eq!(payload.company, "Farmacia Central");
        assert_eq!(payload.street_number, 10);
    }

    #[test]
    fn test_submit_with_missing_fields_keeps_draft_intact() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());

        let errors = wizard.submit().unwrap_err();
        assert!(errors.contains_key("city"));
        assert!(errors.contains_key("password"));
        // Entered data survives the rejection.
        assert_eq!(wizard.draft().company, "Farmacia Central");
    }

    #[test]
    fn test_backend_rejection_is_recorded_without_data_loss() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        wizard.reject("tax_id", "NIF already registered");

        assert_eq!(
            wizard.errors().get("tax_id").map(String::as_str),
            Some("NIF already registered")
        );
        assert_eq!(wizard.draft().tax_id, "5417012345");
    }

    #[test]
    fn test_session_round_trip() {
        let mut wizard = SignUpWizard::new();
        wizard.absorb(step_one_update());
        assert!(wizard.next());

        let json = serde_json::to_string(&wizard).unwrap();
        let restored: SignUpWizard = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.step(), WizardStep::Two);
        assert_eq!(restored.draft(), wizard.draft());
    }
}
