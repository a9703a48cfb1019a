//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the central error type for the relay. The upstream
//! variants together form the single "delivery failed" outcome that
//! [`crate::service::Forwarder::send`] logs and collapses into `false`, so
//! the tracking handlers never turn them into a response themselves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::dto::StatusResponse;

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request never got an HTTP answer (connect, TLS, timeout, body).
    #[error("upstream transport error: {0}")]
    UpstreamTransport(String),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    /// The configured API key cannot be sent as a header value.
    #[error("api key is not a valid header value")]
    InvalidApiKey,

    /// Inbound body could not be used.
    #[error("Invalid JSON body: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the HTTP status code for this variant.
    ///
    /// Upstream variants map to `502` for callers that propagate a
    /// [`crate::service::Forwarder::deliver`] result with `?`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamTransport(_) | Self::UpstreamStatus(_) | Self::InvalidApiKey => {
                StatusCode::BAD_GATEWAY
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamTransport(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = axum::Json(StatusResponse::error(self.to_string())).into_response();
        *response.status_mut() = status;
        response
    }
}
