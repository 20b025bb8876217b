//! Deposit section route handlers.
//!
//! Deposits manage their own inventory and fulfill the orders pharmacies
//! place against it. All pages require a signed-in entity.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use botica_core::OrderId;

use crate::backend::types::{MedicinalListing, NewMedicinal, OrderSummary};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Listings per stock page.
const PER_PAGE: u32 = 12;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// New medicine form data.
#[derive(Debug, Deserialize)]
pub struct NewMedicinalForm {
    pub category: String,
    pub generic_name: String,
    pub brand_name: String,
    pub origin: String,
    /// Expiry date as `YYYY-MM-DD` from a date input.
    pub expiry: String,
    pub available_quantity: u32,
    pub unit_price: Decimal,
    pub image: String,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "deposit/index.html")]
pub struct DashboardTemplate {
    pub user_name: String,
    pub pending_count: usize,
}

/// Stock listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "deposit/stock.html")]
pub struct StockTemplate {
    pub user_name: String,
    pub listings: Vec<MedicinalListing>,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
    pub success: Option<String>,
}

/// New medicine form page template.
#[derive(Template, WebTemplate)]
#[template(path = "deposit/new_medicinal.html")]
pub struct NewMedicinalTemplate {
    pub user_name: String,
    pub error: Option<String>,
}

/// Pending orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "deposit/pending_orders.html")]
pub struct PendingOrdersTemplate {
    pub user_name: String,
    pub orders: Vec<OrderSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Profile page template, with the password change form.
#[derive(Template, WebTemplate)]
#[template(path = "deposit/profile.html")]
pub struct ProfileTemplate {
    pub user_name: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the deposit dashboard.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let pending = state
        .backend()
        .deposit_pending_orders(user.token.as_deref())
        .await?;

    Ok(DashboardTemplate {
        user_name: user.name,
        pending_count: pending.len(),
    })
}

/// Display the deposit's own stock.
#[instrument(skip(state, user))]
pub async fn stock(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(pagination): Query<PaginationQuery>,
    Query(message): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let current_page = pagination.page.unwrap_or(1).max(1);
    let page = state
        .backend()
        .list_medicinals(current_page, PER_PAGE, user.token.as_deref())
        .await?;

    let total_pages =
        u32::try_from(page.total_items.div_ceil(u64::from(PER_PAGE)).max(1)).unwrap_or(u32::MAX);
    Ok(StockTemplate {
        user_name: user.name,
        listings: page.items,
        current_page,
        total_pages,
        has_more_pages: current_page < total_pages,
        success: message.success,
    })
}

/// Display the new medicine form.
pub async fn new_medicinal_page(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    NewMedicinalTemplate {
        user_name: user.name,
        error: query.error,
    }
}

/// Register a new medicine in the deposit's stock.
#[instrument(skip(state, user, form))]
pub async fn create_medicinal(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<NewMedicinalForm>,
) -> Response {
    let Some(expiry) = parse_expiry(&form.expiry) else {
        return Redirect::to("/deposit/medicines/new?error=invalid_expiry").into_response();
    };

    let medicinal = NewMedicinal {
        category: form.category,
        generic_name: form.generic_name,
        brand_name: form.brand_name,
        origin: form.origin,
        expiry,
        available_quantity: form.available_quantity,
        unit_price: form.unit_price,
        image: form.image,
    };

    match state
        .backend()
        .add_medicinal(&medicinal, user.token.as_deref())
        .await
    {
        Ok(()) => Redirect::to("/deposit/stock?success=medicinal_added").into_response(),
        Err(e) => {
            tracing::warn!("Failed to register medicine: {e}");
            Redirect::to("/deposit/medicines/new?error=rejected").into_response()
        }
    }
}

/// Display orders pharmacies have placed against this deposit.
#[instrument(skip(state, user))]
pub async fn pending_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let orders = state
        .backend()
        .deposit_pending_orders(user.token.as_deref())
        .await?;

    Ok(PendingOrdersTemplate {
        user_name: user.name,
        orders,
        error: query.error,
        success: query.success,
    })
}

/// Mark an order as fulfilled.
#[instrument(skip(state, user))]
pub async fn fulfill_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let order_id = OrderId::from(id);
    match state
        .backend()
        .fulfill_order(&order_id, user.token.as_deref())
        .await
    {
        Ok(()) => Redirect::to("/deposit/orders/pending?success=fulfilled").into_response(),
        Err(e) => {
            tracing::warn!(order_id = %order_id, "Failed to fulfill order: {e}");
            Redirect::to("/deposit/orders/pending?error=fulfill_failed").into_response()
        }
    }
}

/// Display the profile page with the password change form.
pub async fn profile(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ProfileTemplate {
        user_name: user.name,
        error: query.error,
        success: query.success,
    }
}

/// Parse a `YYYY-MM-DD` date input into a UTC timestamp at midnight.
fn parse_expiry(value: &str) -> Option<DateTime<Utc>> {
    let date = value.trim().parse::<NaiveDate>().ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
