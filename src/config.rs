//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Nothing here is re-read after startup.

use std::fmt;
use std::net::SocketAddr;

/// Default Hyros server-to-server sale endpoint.
pub const DEFAULT_POSTBACK_URL: &str = "https://app.hyros.com/api/v1/sale";

/// Default bind address for the HTTP server.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Upstream settings handed to the [`crate::service::Forwarder`].
///
/// Immutable once built. The API key is redacted from `Debug` output so it
/// never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct HyrosConfig {
    /// Value sent in the `X-Hyros-API-Key` header. May be empty.
    pub api_key: String,

    /// Full URL of the postback endpoint.
    pub postback_url: String,
}

impl HyrosConfig {
    /// Creates an upstream configuration pointing at `postback_url`.
    #[must_use]
    pub fn new(api_key: impl Into<String>, postback_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            postback_url: postback_url.into(),
        }
    }
}

impl fmt::Debug for HyrosConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("HyrosConfig")
            .field("api_key", &key)
            .field("postback_url", &self.postback_url)
            .finish()
    }
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5000`).
    pub listen_addr: SocketAddr,

    /// Upstream API key and URL.
    pub hyros: HyrosConfig,

    /// Whether `POST /test-hyros` is mounted.
    pub test_endpoint_enabled: bool,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. A missing
    /// `HYROS_API_KEY` is not an error; upstream calls will simply be
    /// rejected. Calls `dotenvy::dotenv().ok()` to optionally load a `.env`
    /// file first.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a [`SocketAddr`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::net::AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let api_key = lookup("HYROS_API_KEY").unwrap_or_default();
        let postback_url =
            lookup("HYROS_POSTBACK_URL").unwrap_or_else(|| DEFAULT_POSTBACK_URL.to_string());

        let test_endpoint_enabled = parse_bool(lookup("TEST_ENDPOINT_ENABLED"), true);
        let log_json = lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json"));

        Ok(Self {
            listen_addr,
            hyros: HyrosConfig::new(api_key, postback_url),
            test_endpoint_enabled,
            log_json,
        })
    }
}

/// Parses a boolean flag. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}
