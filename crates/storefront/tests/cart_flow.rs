//! Integration tests for the session-scoped cart over the full router.
//!
//! These drive the real middleware stack (sessions included) without a
//! backend: every cart operation is local to the session, so no network
//! is involved until checkout.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;

use botica_storefront::config::{BackendApiConfig, StorefrontConfig};
use botica_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kX9mP2vQ8rT4wY7zA3bC6dE1fG5hJ0nL".to_string()),
        backend: BackendApiConfig {
            // Unroutable on purpose; cart tests never reach the backend.
            base_url: "http://127.0.0.1:9/".parse().unwrap(),
            timeout_secs: 1,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn test_app() -> Router {
    botica_storefront::app(AppState::new(test_config()))
}

/// Extract the session cookie from a response's `Set-Cookie` header.
fn session_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should start a session")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn add_request(cookie: Option<&str>, medicinal_id: &str, quantity: u32) -> Request<Body> {
    let body = format!(
        "medicinal_id={medicinal_id}&name=Panadol&unit_price=1999.50&deposit_id=dep-1&quantity={quantity}"
    );
    let mut builder = Request::builder()
        .method("POST")
        .uri("/pharmacy/cart/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

fn count_request(cookie: &str) -> Request<Body> {
    Request::builder()
        .uri("/pharmacy/cart/count")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_add_to_cart_returns_badge_and_trigger() {
    let app = test_app();
    let response = app.oneshot(add_request(None, "med-1", 1)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("HX-Trigger").unwrap(),
        "cart-updated"
    );
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("botica_session="));
    assert_eq!(body_text(response).await.trim(), "1");
}

#[tokio::test]
async fn test_adding_same_listing_merges_quantities() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(add_request(None, "med-1", 2))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(add_request(Some(&cookie), "med-1", 3))
        .await
        .unwrap();
    assert_eq!(body_text(response).await.trim(), "5");

    // The count endpoint agrees with what add reported.
    let response = app.oneshot(count_request(&cookie)).await.unwrap();
    assert_eq!(body_text(response).await.trim(), "5");
}

#[tokio::test]
async fn test_badge_caps_at_nine_plus() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(add_request(None, "med-1", 9))
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    assert_eq!(body_text(response).await.trim(), "9");

    let response = app
        .oneshot(add_request(Some(&cookie), "med-2", 1))
        .await
        .unwrap();
    assert_eq!(body_text(response).await.trim(), "9+");
}

#[tokio::test]
async fn test_remove_empties_the_cart() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(add_request(None, "med-1", 2))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pharmacy/cart/remove")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from("medicinal_id=med-1&deposit_id=dep-1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("cart is empty"));

    let response = app.oneshot(count_request(&cookie)).await.unwrap();
    assert_eq!(body_text(response).await.trim(), "0");
}

#[tokio::test]
async fn test_update_to_zero_removes_the_line() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(add_request(None, "med-1", 4))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pharmacy/cart/update")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from("medicinal_id=med-1&deposit_id=dep-1&quantity=0"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(body_text(response).await.contains("cart is empty"));
}

#[tokio::test]
async fn test_cart_page_requires_sign_in() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pharmacy/cart")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/sign-in"
    );
}
