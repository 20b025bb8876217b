//! Platform backend API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for accounts, catalog, and orders -
//!   NO local sync, direct REST calls over JSON
//! - One thin wrapper method per endpoint: fixed method and path, typed
//!   response, no retry, no caching, no batching
//! - Failures are propagated verbatim to the calling page for user-facing
//!   notification
//!
//! # Example
//!
//! ```rust,ignore
//! use botica_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend);
//!
//! // Browse the catalog
//! let page = client.list_medicinals(1, 20).await?;
//!
//! // Sign in and branch on the reported role
//! let account = client.sign_in(&credentials).await?;
//! ```

mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the platform backend.
///
/// This is the only failure type the page layer sees for network work:
/// local validation never produces one, and every variant maps to a
/// user-facing notification at the handler boundary.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a 4xx/5xx status.
    ///
    /// `message` carries the backend-supplied reason when the body had one,
    /// or a generic fallback otherwise.
    #[error("backend rejected the request ({status}): {message}")]
    Api {
        /// HTTP status code reported by the backend.
        status: u16,
        /// Server-supplied message, or a generic fallback.
        message: String,
    },

    /// The response body could not be parsed as the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response envelope reported `success: false` without an HTTP
    /// error status.
    #[error("backend reported failure: {0}")]
    Envelope(String),
}

impl BackendError {
    /// Whether this failure is the backend's fault (5xx-class) rather than
    /// bad input. Used to decide what gets captured to Sentry.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500,
            Self::Http(_) | Self::Parse(_) | Self::Envelope(_) => true,
        }
    }

    /// The message to show the user, preferring the server-supplied text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Envelope(message) => message.clone(),
            Self::Http(_) | Self::Parse(_) => {
                "The service is unavailable right now. Try again shortly.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = BackendError::Api {
            status: 409,
            message: "NIF already registered".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend rejected the request (409): NIF already registered"
        );
        assert_eq!(err.user_message(), "NIF already registered");
    }

    #[test]
    fn test_server_fault_classification() {
        let client_side = BackendError::Api {
            status: 422,
            message: "invalid".to_string(),
        };
        assert!(!client_side.is_server_fault());

        let server_side = BackendError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert!(server_side.is_server_fault());

        assert!(BackendError::Envelope("odd".to_string()).is_server_fault());
    }

    #[test]
    fn test_transport_failures_get_generic_user_message() {
        let err = BackendError::Envelope("internal detail".to_string());
        assert_eq!(err.user_message(), "internal detail");

        let parse = BackendError::Parse(serde_json::from_str::<u8>("{").unwrap_err());
        assert!(parse.user_message().contains("unavailable"));
    }
}
