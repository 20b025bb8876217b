//! Sign-up wizard route handlers.
//!
//! The wizard state lives in the session; each POST loads it, merges the
//! submitted fields, drives one transition and writes it back. Values
//! entered on any step survive navigation in both directions and a
//! rejected final submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::models::session::keys;
use crate::schemas::FieldErrors;
use crate::schemas::sign_up::SignUpDraft;
use crate::state::AppState;
use crate::wizard::{DraftUpdate, SignUpWizard, WizardStep};

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the wizard from the session, fresh at step one if none exists.
async fn get_wizard(session: &Session) -> SignUpWizard {
    session
        .get::<SignUpWizard>(keys::SIGN_UP_WIZARD)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the wizard back to the session.
async fn save_wizard(
    session: &Session,
    wizard: &SignUpWizard,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::SIGN_UP_WIZARD, wizard).await
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-up wizard page template.
///
/// Renders the active step's fields with any errors from the last
/// rejected transition; the other steps' values ride along in the draft.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_up.html")]
pub struct SignUpTemplate {
    pub step: u8,
    pub is_last: bool,
    pub draft: SignUpDraft,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

impl SignUpTemplate {
    fn from_wizard(wizard: &SignUpWizard, error: Option<String>) -> Self {
        Self {
            step: wizard.step().number(),
            is_last: wizard.step().is_last(),
            draft: wizard.draft().clone(),
            errors: wizard.errors().clone(),
            error,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the current wizard step.
#[instrument(skip(session))]
pub async fn page(session: Session) -> impl IntoResponse {
    let wizard = get_wizard(&session).await;
    SignUpTemplate::from_wizard(&wizard, None)
}

/// Validate the active step and advance on success.
#[instrument(skip(session, form))]
pub async fn next(session: Session, Form(form): Form<DraftUpdate>) -> Response {
    let mut wizard = get_wizard(&session).await;
    wizard.absorb(form);
    wizard.next();

    if let Err(e) = save_wizard(&session, &wizard).await {
        tracing::error!("Failed to save wizard to session: {e}");
    }

    SignUpTemplate::from_wizard(&wizard, None).into_response()
}

/// Step back without validating; entered values are kept.
#[instrument(skip(session, form))]
pub async fn previous(session: Session, Form(form): Form<DraftUpdate>) -> Response {
    let mut wizard = get_wizard(&session).await;
    wizard.absorb(form);
    wizard.previous();

    if let Err(e) = save_wizard(&session, &wizard).await {
        tracing::error!("Failed to save wizard to session: {e}");
    }

    SignUpTemplate::from_wizard(&wizard, None).into_response()
}

/// Final submission: validate everything and register with the backend.
///
/// A backend rejection (say, a duplicate NIF) re-renders the final step
/// with the message; the draft is never discarded on failure.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DraftUpdate>,
) -> Response {
    let mut wizard = get_wizard(&session).await;
    wizard.absorb(form);

    // Guard against a stale form posting submit before the last step.
    if wizard.step() != WizardStep::Three {
        if let Err(e) = save_wizard(&session, &wizard).await {
            tracing::error!("Failed to save wizard to session: {e}");
        }
        return SignUpTemplate::from_wizard(&wizard, None).into_response();
    }

    let payload = match wizard.submit() {
        Ok(payload) => payload,
        Err(_) => {
            if let Err(e) = save_wizard(&session, &wizard).await {
                tracing::error!("Failed to save wizard to session: {e}");
            }
            return SignUpTemplate::from_wizard(&wizard, None).into_response();
        }
    };

    match state.backend().sign_up(&payload).await {
        Ok(()) => {
            if let Err(e) = session.remove::<SignUpWizard>(keys::SIGN_UP_WIZARD).await {
                tracing::error!("Failed to clear wizard from session: {e}");
            }
            Redirect::to("/auth/sign-in?success=registered").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration rejected by backend: {e}");
            let message = e.user_message();
            wizard.reject("submit", message.clone());
            if let Err(e) = save_wizard(&session, &wizard).await {
                tracing::error!("Failed to save wizard to session: {e}");
            }
            SignUpTemplate::from_wizard(&wizard, Some(message)).into_response()
        }
    }
}

/// Discard the in-progress registration.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Response {
    if let Err(e) = session.remove::<SignUpWizard>(keys::SIGN_UP_WIZARD).await {
        tracing::error!("Failed to clear wizard from session: {e}");
    }
    Redirect::to("/auth/sign-in").into_response()
}
