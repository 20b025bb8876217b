//! Admin section route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::types::EntityAccount;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Registered entities overview template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/entities.html")]
pub struct EntitiesTemplate {
    pub user_name: String,
    pub entities: Vec<EntityAccount>,
}

/// Display every registered pharmacy and deposit.
#[instrument(skip(state, user))]
pub async fn entities(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let entities = state.backend().list_entities(user.token.as_deref()).await?;

    Ok(EntitiesTemplate {
        user_name: user.name,
        entities,
    })
}
