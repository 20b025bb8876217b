//! Backend REST client implementation.
//!
//! One method per endpoint over `reqwest`. Every call is a single
//! fire-and-forget request; a page navigating away simply discards
//! interest in the result.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use botica_core::{DepositId, OrderId};

use crate::backend::BackendError;
use crate::backend::types::{
    ApiEnvelope, ApiErrorBody, DepositSummary, EntityAccount, MedicinalListing, NewMedicinal,
    NewOrder, OrderSummary, Paginated, RecoveryRequest, ResetPasswordRequest, SignInRequest,
    SignInResponse, SignUpPayload,
};

/// Client for the platform backend API.
///
/// Cheaply cloneable; holds a single connection pool for the process.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest` client cannot be constructed,
    /// which only happens with an invalid TLS backend at startup.
    #[must_use]
    pub fn new(config: &crate::config::BackendApiConfig) -> Self {
        #[allow(clippy::expect_used)]
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to construct HTTP client");

        Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Resolve a path against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| BackendError::Envelope(format!("invalid endpoint {path}: {e}")))
    }

    /// Execute a request and decode the JSON body.
    ///
    /// 4xx/5xx responses become [`BackendError::Api`] carrying the
    /// backend's `message` field when the body has one.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        let mut request = self.inner.client.request(method, url).query(query);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| generic_status_message(status));
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Decode an enveloped list response into a [`Paginated`] page.
    fn unwrap_page<T>(envelope: ApiEnvelope<Vec<T>>) -> Result<Paginated<T>, BackendError> {
        if !envelope.success {
            return Err(BackendError::Envelope(
                "the backend reported an unsuccessful response".to_string(),
            ));
        }
        let total_items = envelope
            .pagination
            .map_or(envelope.response.len() as u64, |p| p.total_items);
        Ok(Paginated {
            items: envelope.response,
            total_items,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// `POST /auth/sign-in` - authenticate and learn the account's role.
    ///
    /// # Errors
    ///
    /// Returns an error for bad credentials or transport failures. An
    /// unrecognized role is NOT an error here; it deserializes to
    /// `EntityRole::Unknown` and the caller decides.
    #[instrument(skip(self, credentials))]
    pub async fn sign_in(
        &self,
        credentials: &SignInRequest,
    ) -> Result<SignInResponse, BackendError> {
        self.execute(Method::POST, "auth/sign-in", &[], Some(credentials), None)
            .await
    }

    /// `POST /auth/sign-up` - register a new pharmacy or deposit.
    ///
    /// # Errors
    ///
    /// Returns the backend's field-level rejection (e.g. duplicate NIF) as
    /// [`BackendError::Api`].
    #[instrument(skip(self, payload))]
    pub async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), BackendError> {
        self.execute::<serde_json::Value>(Method::POST, "auth/sign-up", &[], Some(payload), None)
            .await?;
        Ok(())
    }

    /// `POST /auth/recovery` - trigger a credential recovery email.
    #[instrument(skip(self))]
    pub async fn recover_credentials(&self, email: &str) -> Result<(), BackendError> {
        let body = RecoveryRequest {
            email: email.to_owned(),
        };
        self.execute::<serde_json::Value>(Method::POST, "auth/recovery", &[], Some(&body), None)
            .await?;
        Ok(())
    }

    /// `POST /auth/reset-password` - replace the password, old for new.
    #[instrument(skip(self, request))]
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
        token: Option<&str>,
    ) -> Result<(), BackendError> {
        self.execute::<serde_json::Value>(
            Method::POST,
            "auth/reset-password",
            &[],
            Some(request),
            token,
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// `GET /entity/deposit/medicines` - the cross-deposit catalog page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope reports
    /// failure.
    #[instrument(skip(self, token))]
    pub async fn list_medicinals(
        &self,
        page: u32,
        per_page: u32,
        token: Option<&str>,
    ) -> Result<Paginated<MedicinalListing>, BackendError> {
        let envelope: ApiEnvelope<Vec<MedicinalListing>> = self
            .execute(
                Method::GET,
                "entity/deposit/medicines",
                &[("page", page.to_string()), ("perPage", per_page.to_string())],
                None::<&()>,
                token,
            )
            .await?;
        Self::unwrap_page(envelope)
    }

    /// `GET /entity/deposits` - deposits a pharmacy can browse.
    #[instrument(skip(self, token))]
    pub async fn list_deposits(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<DepositSummary>, BackendError> {
        let envelope: ApiEnvelope<Vec<DepositSummary>> = self
            .execute(Method::GET, "entity/deposits", &[], None::<&()>, token)
            .await?;
        Ok(Self::unwrap_page(envelope)?.items)
    }

    /// `GET /entity/deposit/{id}/medicines` - one deposit's inventory.
    #[instrument(skip(self, token))]
    pub async fn deposit_medicinals(
        &self,
        deposit_id: &DepositId,
        page: u32,
        per_page: u32,
        token: Option<&str>,
    ) -> Result<Paginated<MedicinalListing>, BackendError> {
        let path = format!("entity/deposit/{deposit_id}/medicines");
        let envelope: ApiEnvelope<Vec<MedicinalListing>> = self
            .execute(
                Method::GET,
                &path,
                &[("page", page.to_string()), ("perPage", per_page.to_string())],
                None::<&()>,
                token,
            )
            .await?;
        Self::unwrap_page(envelope)
    }

    /// `POST /entity/deposit/medicines` - a deposit adds stock.
    #[instrument(skip(self, medicinal, token))]
    pub async fn add_medicinal(
        &self,
        medicinal: &NewMedicinal,
        token: Option<&str>,
    ) -> Result<(), BackendError> {
        self.execute::<serde_json::Value>(
            Method::POST,
            "entity/deposit/medicines",
            &[],
            Some(medicinal),
            token,
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// `POST /entity/pharmacy/orders` - submit the cart as an order.
    #[instrument(skip(self, order, token))]
    pub async fn place_order(
        &self,
        order: &NewOrder,
        token: Option<&str>,
    ) -> Result<OrderSummary, BackendError> {
        let envelope: ApiEnvelope<OrderSummary> = self
            .execute(
                Method::POST,
                "entity/pharmacy/orders",
                &[],
                Some(order),
                token,
            )
            .await?;
        if !envelope.success {
            return Err(BackendError::Envelope(
                "the backend reported an unsuccessful response".to_string(),
            ));
        }
        Ok(envelope.response)
    }

    /// `GET /entity/pharmacy/orders` - a pharmacy's pending orders.
    #[instrument(skip(self, token))]
    pub async fn pharmacy_orders(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<OrderSummary>, BackendError> {
        let envelope: ApiEnvelope<Vec<OrderSummary>> = self
            .execute(
                Method::GET,
                "entity/pharmacy/orders",
                &[],
                None::<&()>,
                token,
            )
            .await?;
        Ok(Self::unwrap_page(envelope)?.items)
    }

    /// `GET /entity/deposit/orders/pending` - orders waiting on a deposit.
    #[instrument(skip(self, token))]
    pub async fn deposit_pending_orders(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<OrderSummary>, BackendError> {
        let envelope: ApiEnvelope<Vec<OrderSummary>> = self
            .execute(
                Method::GET,
                "entity/deposit/orders/pending",
                &[],
                None::<&()>,
                token,
            )
            .await?;
        Ok(Self::unwrap_page(envelope)?.items)
    }

    /// `POST /entity/deposit/orders/{id}/fulfill` - mark an order done.
    #[instrument(skip(self, token))]
    pub async fn fulfill_order(
        &self,
        order_id: &OrderId,
        token: Option<&str>,
    ) -> Result<(), BackendError> {
        let path = format!("entity/deposit/orders/{order_id}/fulfill");
        self.execute::<serde_json::Value>(Method::POST, &path, &[], None::<&()>, token)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// `GET /admin/entities` - every registered pharmacy and deposit.
    #[instrument(skip(self, token))]
    pub async fn list_entities(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<EntityAccount>, BackendError> {
        let envelope: ApiEnvelope<Vec<EntityAccount>> = self
            .execute(Method::GET, "admin/entities", &[], None::<&()>, token)
            .await?;
        Ok(Self::unwrap_page(envelope)?.items)
    }
}

/// Fallback message when the backend's error body carries no `message`.
fn generic_status_message(status: StatusCode) -> String {
    match status.as_u16() {
        401 | 403 => "You are not allowed to do that.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        500..=599 => "The service is unavailable right now. Try again shortly.".to_string(),
        _ => format!("The request failed with status {status}."),
    }
}
