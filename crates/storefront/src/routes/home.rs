//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};

use crate::filters;
use crate::middleware::OptionalAuth;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// Display the landing page, or send a signed-in entity to its section.
pub async fn home(OptionalAuth(user): OptionalAuth) -> Response {
    if let Some(home) = user.and_then(|u| u.role.home_path()) {
        return Redirect::to(home).into_response();
    }

    HomeTemplate.into_response()
}
