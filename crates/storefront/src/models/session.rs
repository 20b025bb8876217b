//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use botica_core::{EntityId, EntityRole};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in entity
/// and authorize backend calls on its behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Entity's backend ID.
    pub id: EntityId,
    /// Display name (the registered company name).
    pub name: String,
    /// Role the backend reported at sign-in.
    pub role: EntityRole,
    /// Bearer token for authenticated backend calls, when issued.
    pub token: Option<String>,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in entity.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the session-scoped cart.
    pub const CART: &str = "cart";

    /// Key for in-progress sign-up wizard state.
    pub const SIGN_UP_WIZARD: &str = "sign_up_wizard";
}
