//! Pharmacy section route handlers.
//!
//! Everything here requires a signed-in entity; the catalog and deposit
//! pages render backend listings directly, and each page view fetches a
//! fresh copy rather than caching anything locally.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use botica_core::DepositId;

use crate::backend::types::{DepositSummary, MedicinalListing, OrderSummary};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Listings per catalog page.
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

/// Medicine catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "pharmacy/index.html")]
pub struct CatalogTemplate {
    pub user_name: String,
    pub listings: Vec<MedicinalListing>,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

/// Deposit directory page template.
#[derive(Template, WebTemplate)]
#[template(path = "pharmacy/deposits.html")]
pub struct DepositsTemplate {
    pub user_name: String,
    pub deposits: Vec<DepositSummary>,
}

/// Single deposit inventory page template.
#[derive(Template, WebTemplate)]
#[template(path = "pharmacy/deposit_show.html")]
pub struct DepositShowTemplate {
    pub user_name: String,
    pub deposit_name: String,
    pub listings: Vec<MedicinalListing>,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "pharmacy/orders.html")]
pub struct OrdersTemplate {
    pub user_name: String,
    pub orders: Vec<OrderSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Pages needed for `total_items` at `PER_PAGE` per page, at least one.
fn total_pages(total_items: u64) -> u32 {
    let pages = total_items.div_ceil(u64::from(PER_PAGE));
    u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
}

/// Display the cross-deposit medicine catalog.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let current_page = query.page.unwrap_or(1).max(1);
    let page = state
        .backend()
        .list_medicinals(current_page, PER_PAGE, user.token.as_deref())
        .await?;

    let total_pages = total_pages(page.total_items);
    Ok(CatalogTemplate {
        user_name: user.name,
        listings: page.items,
        current_page,
        total_pages,
        has_more_pages: current_page < total_pages,
    })
}

/// Display the deposit directory.
#[instrument(skip(state, user))]
pub async fn deposits(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let deposits = state.backend().list_deposits(user.token.as_deref()).await?;

    Ok(DepositsTemplate {
        user_name: user.name,
        deposits,
    })
}

/// Display one deposit's inventory.
#[instrument(skip(state, user))]
pub async fn deposit_show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let deposit_id = DepositId::from(id);
    let current_page = query.page.unwrap_or(1).max(1);
    let page = state
        .backend()
        .deposit_medicinals(&deposit_id, current_page, PER_PAGE, user.token.as_deref())
        .await?;

    let deposit_name = page
        .items
        .first()
        .map_or_else(|| deposit_id.to_string(), |l| l.deposit.firm.clone());

    let total_pages = total_pages(page.total_items);
    Ok(DepositShowTemplate {
        user_name: user.name,
        deposit_name,
        listings: page.items,
        current_page,
        total_pages,
        has_more_pages: current_page < total_pages,
    })
}

/// Display the pharmacy's order history.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let orders = state
        .backend()
        .pharmacy_orders(user.token.as_deref())
        .await?;

    Ok(OrdersTemplate {
        user_name: user.name,
        orders,
        error: query.error,
        success: query.success,
    })
}

#[cfg(test)]
mod tests {
    use super::total_pages;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(12), 1);
        assert_eq!(total_pages(13), 2);
        assert_eq!(total_pages(120), 10);
    }
}
