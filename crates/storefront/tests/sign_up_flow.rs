//! Integration tests for the sign-up wizard over the full router.
//!
//! The wizard never talks to the backend until final submission, so these
//! exercise step validation and data preservation with no network at all.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;

use botica_storefront::config::{BackendApiConfig, StorefrontConfig};
use botica_storefront::state::AppState;

fn test_app() -> Router {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kX9mP2vQ8rT4wY7zA3bC6dE1fG5hJ0nL".to_string()),
        backend: BackendApiConfig {
            base_url: "http://127.0.0.1:9/".parse().unwrap(),
            timeout_secs: 1,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };
    botica_storefront::app(AppState::new(config))
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should start a session")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

const STEP_ONE: &str = "company=Farmacia+Central&tax_id=5417012345&entity=pharmacy";

#[tokio::test]
async fn test_wizard_starts_at_step_one() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/sign-up")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Step 1 of 3"));
}

#[tokio::test]
async fn test_invalid_step_stays_put_with_errors() {
    let app = test_app();
    let response = app
        .oneshot(post("/auth/sign-up/next", None, "company=&tax_id=&entity="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Step 1 of 3"));
    assert!(body.contains("Enter the company name."));
}

#[tokio::test]
async fn test_valid_step_advances_and_back_preserves_values() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post("/auth/sign-up/next", None, STEP_ONE))
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    assert!(body_text(response).await.contains("Step 2 of 3"));

    // Going back re-renders step 1 with the entered values intact.
    let response = app
        .oneshot(post("/auth/sign-up/previous", Some(&cookie), ""))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Step 1 of 3"));
    assert!(body.contains("Farmacia Central"));
    assert!(body.contains("5417012345"));
}

#[tokio::test]
async fn test_cancel_discards_the_draft() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post("/auth/sign-up/next", None, STEP_ONE))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post("/auth/sign-up/cancel", Some(&cookie), ""))
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/sign-up")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Step 1 of 3"));
    assert!(!body.contains("Farmacia Central"));
}

#[tokio::test]
async fn test_sign_in_rejects_email_without_tld() {
    let app = test_app();
    let response = app
        .oneshot(post(
            "/auth/sign-in",
            None,
            "email=user%40domain&password=secreta1",
        ))
        .await
        .unwrap();

    // Re-rendered with a field error instead of contacting the backend.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("user@domain"));
}
