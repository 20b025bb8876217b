//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; the backend is only involved at
//! checkout, when the accumulated lines become an order submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use botica_core::{DepositId, MedicinalId};

use crate::backend::types::{NewOrder, NewOrderLine};
use crate::cart::{Cart, CartItem};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::session::keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub medicinal_id: String,
    pub deposit_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub item_count: u32,
    pub badge: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    medicinal_id: item.medicinal_id.to_string(),
                    deposit_id: item.deposit_id.to_string(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: cart.subtotal(),
            item_count: cart.total_items(),
            badge: cart.badge_label(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none was stored yet.
async fn get_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(Cart::new)
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Add to cart form data.
///
/// Listing attributes travel as hidden form fields so that adding to the
/// cart needs no backend round trip.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub medicinal_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub deposit_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub medicinal_id: String,
    pub deposit_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub medicinal_id: String,
    pub deposit_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub user_name: String,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: String,
}

/// Display cart page.
#[instrument(skip(session, user))]
pub async fn show(RequireAuth(user): RequireAuth, session: Session) -> impl IntoResponse {
    let cart = get_cart(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
        user_name: user.name,
    }
}

/// Add item to cart (HTMX).
///
/// Merges with an existing line for the same medicine. Returns the badge
/// fragment with an HTMX trigger so other cart displays refresh.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Response {
    let quantity = form.quantity.unwrap_or(1);

    let mut cart = get_cart(&session).await;
    cart.add(CartItem {
        medicinal_id: MedicinalId::from(form.medicinal_id),
        name: form.name,
        unit_price: form.unit_price,
        quantity,
        deposit_id: DepositId::from(form.deposit_id),
    });

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<span class=\"text-red-500\">Error adding to cart</span>"),
        )
            .into_response();
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            badge: cart.badge_label(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let mut cart = get_cart(&session).await;
    cart.set_quantity(
        &MedicinalId::from(form.medicinal_id),
        &DepositId::from(form.deposit_id),
        form.quantity,
    );

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut cart = get_cart(&session).await;
    cart.remove(
        &MedicinalId::from(form.medicinal_id),
        &DepositId::from(form.deposit_id),
    );

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
///
/// Shows `9+` once the item count passes nine.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = get_cart(&session).await;

    CartCountTemplate {
        badge: cart.badge_label(),
    }
}

/// Submit the cart as an order.
///
/// Requires a signed-in pharmacy; on success the cart is cleared and the
/// browser is sent to the order history.
#[instrument(skip(state, session, user))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Response {
    let mut cart = get_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/pharmacy/cart").into_response();
    }

    let order = NewOrder {
        lines: cart
            .items()
            .iter()
            .map(|item| NewOrderLine {
                medicinal_id: item.medicinal_id.clone(),
                deposit_id: item.deposit_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
    };

    match state.backend().place_order(&order, user.token.as_deref()).await {
        Ok(placed) => {
            cart.clear();
            if let Err(e) = save_cart(&session, &cart).await {
                tracing::error!("Failed to clear cart after checkout: {e}");
            }
            tracing::info!(order_id = %placed.id, "order placed");
            Redirect::to("/pharmacy/orders?success=order_placed").into_response()
        }
        Err(e) => {
            tracing::error!("Checkout failed: {e}");
            Redirect::to("/pharmacy/cart?error=checkout_failed").into_response()
        }
    }
}
