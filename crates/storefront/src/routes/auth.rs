//! Authentication route handlers.
//!
//! Handles sign-in, credential recovery, password changes and logout
//! against the platform backend. Sign-in routes the entity to its
//! section by the role the backend reports; a role without a home
//! section re-renders the page with an error instead of navigating.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::types::{ResetPasswordRequest, SignInRequest};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::schemas::{self, FieldErrors, recovery::RecoveryForm, sign_in::SignInForm};
use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Reset password form data (posted from the profile page).
#[derive(Debug, Deserialize)]
pub struct ResetPasswordFormData {
    pub old_password: String,
    pub new_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_in.html")]
pub struct SignInTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub field_errors: FieldErrors,
}

/// Credential recovery page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/recovery.html")]
pub struct RecoveryTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub field_errors: FieldErrors,
}

// =============================================================================
// Sign-in Routes
// =============================================================================

/// Display the sign-in page.
pub async fn sign_in_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignInTemplate {
        error: query.error,
        success: query.success,
        email: String::new(),
        field_errors: FieldErrors::new(),
    }
}

/// Handle sign-in form submission.
///
/// Validates locally first, then authenticates against the backend and
/// routes by the reported role. Pharmacies land on `/pharmacy`, deposits
/// on `/deposit`, admins on `/admin`; any other role stays on the page
/// with an error.
#[instrument(skip(state, session, form))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    if let Err(field_errors) = schemas::sign_in::validate(&form) {
        return SignInTemplate {
            error: None,
            success: None,
            email: form.email,
            field_errors,
        }
        .into_response();
    }

    let request = SignInRequest {
        email: form.email.trim().to_owned(),
        password: form.password,
    };

    match state.backend().sign_in(&request).await {
        Ok(account) => {
            let Some(home) = account.role.home_path() else {
                tracing::warn!(role = ?account.role, "sign-in with unroutable role");
                return SignInTemplate {
                    error: Some("This account's role is not recognized. Contact support.".to_string()),
                    success: None,
                    email: request.email,
                    field_errors: FieldErrors::new(),
                }
                .into_response();
            };

            let user = CurrentUser {
                id: account.id,
                name: account.name,
                role: account.role,
                token: account.token,
            };

            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/sign-in?error=session").into_response();
            }

            set_sentry_user(&user.id, Some(&user.name));
            Redirect::to(home).into_response()
        }
        Err(e) => {
            tracing::warn!("Sign-in failed: {e}");
            SignInTemplate {
                error: Some(e.user_message()),
                success: None,
                email: request.email,
                field_errors: FieldErrors::new(),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Credential Recovery Routes
// =============================================================================

/// Display the credential recovery page.
pub async fn recovery_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RecoveryTemplate {
        error: query.error,
        success: query.success,
        email: String::new(),
        field_errors: FieldErrors::new(),
    }
}

/// Handle recovery form submission.
///
/// Always reports success when the backend accepts the request, to avoid
/// confirming which addresses are registered.
#[instrument(skip(state, form))]
pub async fn recovery(State(state): State<AppState>, Form(form): Form<RecoveryForm>) -> Response {
    if let Err(field_errors) = schemas::recovery::validate(&form) {
        return RecoveryTemplate {
            error: None,
            success: None,
            email: form.email,
            field_errors,
        }
        .into_response();
    }

    if let Err(e) = state.backend().recover_credentials(form.email.trim()).await {
        tracing::warn!("Credential recovery request failed: {e}");
        // Still show success to prevent email enumeration
    }

    Redirect::to("/auth/recovery?success=email_sent").into_response()
}

// =============================================================================
// Password Change Route
// =============================================================================

/// Handle a password change from the profile page.
///
/// Requires a signed-in entity; redirects back to the profile with the
/// outcome in the query string.
#[instrument(skip(state, user, form))]
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ResetPasswordFormData>,
) -> Response {
    let schema_form = schemas::reset_password::ResetPasswordForm {
        old_password: form.old_password.clone(),
        new_password: form.new_password.clone(),
    };
    if schemas::reset_password::validate(&schema_form).is_err() {
        return Redirect::to("/deposit/profile?error=password_too_short").into_response();
    }

    let request = ResetPasswordRequest {
        old_password: form.old_password,
        new_password: form.new_password,
    };

    match state
        .backend()
        .reset_password(&request, user.token.as_deref())
        .await
    {
        Ok(()) => Redirect::to("/deposit/profile?success=password_changed").into_response(),
        Err(e) => {
            tracing::warn!("Password change failed: {e}");
            Redirect::to("/deposit/profile?error=password_change_failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session, including the cart and any in-progress sign-up.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();
    Redirect::to("/auth/sign-in").into_response()
}
