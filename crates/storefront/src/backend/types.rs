//! Wire types for the platform backend API.
//!
//! Field names on the wire are the backend's Portuguese identifiers; the
//! Rust side uses English names via serde renames. All of these are
//! read-only projections - the backend owns the data, the client holds an
//! immutable copy per page view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_core::{DepositId, EntityId, EntityKind, EntityRole, MedicinalId, OrderId};

// =============================================================================
// Response Envelope
// =============================================================================

/// The backend wraps every response in a success envelope.
///
/// The wire spells the flag `sucess`; the alias tolerates the corrected
/// spelling should the backend ever fix it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "sucess", alias = "success")]
    pub success: bool,
    pub response: T,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(rename = "totalItems")]
    pub total_items: u64,
}

/// A page of results plus the backend-reported total.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_items: u64,
}

/// Error body the backend sends with 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

// =============================================================================
// Authentication
// =============================================================================

/// Credentials for `POST /auth/sign-in`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Account identity returned by a successful sign-in.
///
/// `role` is open-ended on purpose: an unrecognized value (say, a future
/// "courier" role) deserializes to [`EntityRole::Unknown`] and the sign-in
/// page treats it as an error state without navigating.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub id: EntityId,
    pub name: String,
    pub role: EntityRole,
    /// Bearer token for subsequent authenticated calls, when issued.
    #[serde(default)]
    pub token: Option<String>,
}

/// Full registration payload for `POST /auth/sign-up`.
///
/// Built by the sign-up wizard from a validated draft; numeric fields are
/// typed here because the schema refuses to produce this payload until
/// they parse.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpPayload {
    #[serde(rename = "firma")]
    pub company: String,
    #[serde(rename = "nif")]
    pub tax_id: String,
    #[serde(rename = "entidade")]
    pub entity: EntityKind,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero_rua")]
    pub street_number: i64,
    #[serde(rename = "logradouro")]
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "telefone")]
    pub phone: i64,
    pub email: String,
    #[serde(rename = "palavra_passe")]
    pub password: String,
}

/// Body for `POST /auth/recovery`.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryRequest {
    pub email: String,
}

/// Body for `POST /auth/reset-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    #[serde(rename = "oldPassWord")]
    pub old_password: String,
    #[serde(rename = "newPassWord")]
    pub new_password: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// One medicine listing from a deposit's inventory.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicinalListing {
    #[serde(rename = "id_medicamento")]
    pub id: MedicinalId,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "nome_generico")]
    pub generic_name: String,
    #[serde(rename = "nome_comercial")]
    pub brand_name: String,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "validade")]
    pub expiry: DateTime<Utc>,
    #[serde(rename = "quantidade_disponivel")]
    pub available_quantity: u32,
    #[serde(rename = "deposito")]
    pub deposit: DepositRef,
    #[serde(rename = "preco")]
    pub unit_price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
}

/// The owning deposit of a listing, with its address fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositRef {
    #[serde(rename = "id_deposito", default)]
    pub id: Option<DepositId>,
    #[serde(rename = "firma_deposito")]
    pub firm: String,
    #[serde(rename = "logradouro")]
    pub locality: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero_rua")]
    pub street_number: i64,
    #[serde(rename = "cidade")]
    pub city: String,
}

/// A deposit as listed on the pharmacy's deposits page.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositSummary {
    #[serde(rename = "id_deposito")]
    pub id: DepositId,
    #[serde(rename = "firma")]
    pub firm: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "total_medicamentos")]
    pub medicinal_count: u32,
}

/// Payload for `POST /entity/deposit/medicines` (deposit adds stock).
#[derive(Debug, Clone, Serialize)]
pub struct NewMedicinal {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "nome_generico")]
    pub generic_name: String,
    #[serde(rename = "nome_comercial")]
    pub brand_name: String,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "validade")]
    pub expiry: DateTime<Utc>,
    #[serde(rename = "quantidade_disponivel")]
    pub available_quantity: u32,
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
}

// =============================================================================
// Orders
// =============================================================================

/// Status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
}

/// One line of an order submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderLine {
    #[serde(rename = "id_medicamento")]
    pub medicinal_id: MedicinalId,
    #[serde(rename = "id_deposito")]
    pub deposit_id: DepositId,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// Order submission for `POST /entity/pharmacy/orders` (checkout).
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    #[serde(rename = "itens")]
    pub lines: Vec<NewOrderLine>,
}

/// An order as reported back by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "id_encomenda")]
    pub id: OrderId,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "total", default)]
    pub total: Option<Decimal>,
    #[serde(rename = "total_itens")]
    pub item_count: u32,
    #[serde(rename = "firma_farmacia", default)]
    pub pharmacy_firm: Option<String>,
}

// =============================================================================
// Administration
// =============================================================================

/// A registered platform entity as shown on the admin overview.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityAccount {
    pub id: EntityId,
    #[serde(rename = "firma")]
    pub firm: String,
    #[serde(rename = "nif")]
    pub tax_id: String,
    pub role: EntityRole,
    #[serde(rename = "cidade")]
    pub city: String,
    pub email: String,
}
