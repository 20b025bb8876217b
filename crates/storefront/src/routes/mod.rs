//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page (redirects signed-in entities home)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/sign-in           - Sign-in page
//! POST /auth/sign-in           - Sign-in action (routes by reported role)
//! GET  /auth/recovery          - Credential recovery page
//! POST /auth/recovery          - Request recovery email
//! POST /auth/reset-password    - Change password (requires auth)
//! POST /auth/logout            - Logout action
//!
//! # Sign-up wizard
//! GET  /auth/sign-up           - Current wizard step
//! POST /auth/sign-up/next      - Validate active step, advance on success
//! POST /auth/sign-up/previous  - Step back without validation
//! POST /auth/sign-up/submit    - Final validation and registration
//! POST /auth/sign-up/cancel    - Discard the draft
//!
//! # Pharmacy (requires auth)
//! GET  /pharmacy               - Medicine catalog (paginated)
//! GET  /pharmacy/deposits      - Deposit directory
//! GET  /pharmacy/deposits/{id} - One deposit's medicines
//! GET  /pharmacy/orders        - Order history
//!
//! # Cart (HTMX fragments)
//! GET  /pharmacy/cart          - Cart page
//! POST /pharmacy/cart/add      - Add to cart (returns count, triggers cart-updated)
//! POST /pharmacy/cart/update   - Update quantity (returns cart_items fragment)
//! POST /pharmacy/cart/remove   - Remove item (returns cart_items fragment)
//! GET  /pharmacy/cart/count    - Cart count badge (fragment)
//! POST /pharmacy/cart/checkout - Place the order from the cart (requires auth)
//!
//! # Deposit (requires auth)
//! GET  /deposit                - Dashboard
//! GET  /deposit/stock          - Stock listing
//! GET  /deposit/medicines/new  - New medicine form
//! POST /deposit/medicines/new  - Register a medicine
//! GET  /deposit/orders/pending - Pending orders
//! POST /deposit/orders/{id}/fulfill - Mark an order fulfilled
//! GET  /deposit/profile        - Profile and password change
//!
//! # Admin (requires auth)
//! GET  /admin                  - Registered entities overview
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod deposit;
pub mod home;
pub mod pharmacy;
pub mod sign_up;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/recovery", get(auth::recovery_page).post(auth::recovery))
        .route("/reset-password", post(auth::reset_password))
        .route("/logout", post(auth::logout))
        .nest("/sign-up", sign_up_routes())
}

/// Create the sign-up wizard routes router.
pub fn sign_up_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sign_up::page))
        .route("/next", post(sign_up::next))
        .route("/previous", post(sign_up::previous))
        .route("/submit", post(sign_up::submit))
        .route("/cancel", post(sign_up::cancel))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the pharmacy routes router.
pub fn pharmacy_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pharmacy::index))
        .route("/deposits", get(pharmacy::deposits))
        .route("/deposits/{id}", get(pharmacy::deposit_show))
        .route("/orders", get(pharmacy::orders))
        .nest("/cart", cart_routes())
}

/// Create the deposit routes router.
pub fn deposit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(deposit::index))
        .route("/stock", get(deposit::stock))
        .route(
            "/medicines/new",
            get(deposit::new_medicinal_page).post(deposit::create_medicinal),
        )
        .route("/orders/pending", get(deposit::pending_orders))
        .route("/orders/{id}/fulfill", post(deposit::fulfill_order))
        .route("/profile", get(deposit::profile))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/", get(admin::entities))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Auth routes (sign-in, recovery, sign-up wizard)
        .nest("/auth", auth_routes())
        // Pharmacy section (catalog, deposits, orders, cart)
        .nest("/pharmacy", pharmacy_routes())
        // Deposit section (stock, pending orders, profile)
        .nest("/deposit", deposit_routes())
        // Admin section
        .nest("/admin", admin_routes())
}
