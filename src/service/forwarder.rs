//! Forwarder: reshapes an [`Event`] and posts it to Hyros.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

use crate::config::HyrosConfig;
use crate::domain::{Event, HyrosPayload};
use crate::error::RelayError;

/// Header carrying the Hyros API key.
pub const API_KEY_HEADER: &str = "X-Hyros-API-Key";

/// Sends postbacks to the configured Hyros endpoint.
///
/// One outbound POST per [`Forwarder::send`] call. No retries, no timeout
/// beyond the HTTP client defaults. Cheap to share behind an `Arc`; the
/// inner client pools connections.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    config: HyrosConfig,
}

impl Forwarder {
    /// Creates a forwarder with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Internal`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: HyrosConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RelayError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Returns the upstream configuration.
    #[must_use]
    pub fn config(&self) -> &HyrosConfig {
        &self.config
    }

    /// Delivers `event` and reports whether Hyros accepted it.
    ///
    /// Never fails: every [`RelayError`] from [`Forwarder::deliver`] is
    /// logged at error level and turned into `false`.
    pub async fn send(&self, event: &Event) -> bool {
        let payload = HyrosPayload::from(event);
        match self.deliver(&payload).await {
            Ok(status) => {
                tracing::info!(status = status.as_u16(), "hyros postback success");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "hyros postback failed");
                false
            }
        }
    }

    /// Posts `payload` once and returns the upstream status on 2xx.
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidApiKey`] if the key is not a valid header value
    /// - [`RelayError::UpstreamTransport`] if no response was received
    /// - [`RelayError::UpstreamStatus`] if the response was not 2xx
    pub async fn deliver(&self, payload: &HyrosPayload) -> Result<StatusCode, RelayError> {
        let mut api_key =
            HeaderValue::from_str(&self.config.api_key).map_err(|_| RelayError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        tracing::debug!(url = %self.config.postback_url, "sending hyros postback");

        let response = self
            .client
            .post(&self.config.postback_url)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status));
        }
        Ok(status)
    }
}
