//! Tracked events and the Hyros wire payload built from them.
//!
//! An [`Event`] is constructed per request and discarded after the
//! postback. Every field is optional; [`HyrosPayload::from`] fills the gaps
//! so the outbound body is always fully populated.
//!
//! `email`, `revenue` and `source` are carried as raw JSON values: whatever
//! the caller sent is forwarded as-is, only absence is replaced.

use serde::Serialize;
use serde_json::Value;

/// Currency sent with every postback.
pub const CURRENCY: &str = "USD";

/// Email used when an event carries none.
pub const DEFAULT_EMAIL: &str = "test@example.com";

/// Event type used when an event carries none.
pub const DEFAULT_EVENT_TYPE: &str = "test";

/// Attribution source used when an event carries none.
pub const DEFAULT_SOURCE: &str = "manual";

/// Timestamp used when an event carries none.
pub const DEFAULT_TIMESTAMP: &str = "2025-10-01T21:00:00Z";

/// Event type of both entry points.
pub const SALE_EVENT_TYPE: &str = "sale";

/// Email used by `/track-purchase` when the request omits it.
pub const DEFAULT_PURCHASE_EMAIL: &str = "unknown@example.com";

/// Source used by `/track-purchase` when the request omits it.
pub const DEFAULT_PURCHASE_SOURCE: &str = "website_test";

const TEST_EMAIL: &str = "testuser@example.com";
const TEST_REVENUE: f64 = 100.00;
const TEST_SOURCE: &str = "manual_test";

/// Normalized record of a tracked purchase or test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Buyer email, usually a string.
    pub email: Option<Value>,
    /// Sale amount, usually a number. Integers stay integers.
    pub revenue: Option<Value>,
    /// Event type (`"sale"`, `"test"`, ...).
    pub event_type: Option<String>,
    /// Attribution tag, sent upstream as `ad_platform`.
    pub source: Option<Value>,
    /// ISO 8601 timestamp.
    pub timestamp: Option<String>,
}

impl Event {
    /// The fixed record sent by `POST /test-hyros`.
    #[must_use]
    pub fn test_sample() -> Self {
        Self {
            email: Some(Value::from(TEST_EMAIL)),
            revenue: Some(Value::from(TEST_REVENUE)),
            event_type: Some(SALE_EVENT_TYPE.to_string()),
            source: Some(Value::from(TEST_SOURCE)),
            timestamp: None,
        }
    }

    /// A sale built from the optional fields of a `/track-purchase` body.
    ///
    /// `None` and JSON `null` both take the purchase default.
    #[must_use]
    pub fn purchase(email: Option<Value>, revenue: Option<Value>, source: Option<Value>) -> Self {
        Self {
            email: Some(
                present(email).unwrap_or_else(|| Value::from(DEFAULT_PURCHASE_EMAIL)),
            ),
            revenue: Some(present(revenue).unwrap_or_else(|| Value::from(0))),
            event_type: Some(SALE_EVENT_TYPE.to_string()),
            source: Some(
                present(source).unwrap_or_else(|| Value::from(DEFAULT_PURCHASE_SOURCE)),
            ),
            timestamp: None,
        }
    }

    /// The email that will be sent upstream, rendered for messages.
    ///
    /// Strings are returned verbatim; any other JSON value in its JSON form.
    #[must_use]
    pub fn email_display(&self) -> String {
        match present(self.email.clone()) {
            Some(Value::String(email)) => email,
            Some(other) => other.to_string(),
            None => DEFAULT_EMAIL.to_string(),
        }
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

/// Body of `POST /api/v1/sale`. Always exactly these six fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyrosPayload {
    /// Buyer email.
    pub email: Value,
    /// Sale amount.
    pub revenue: Value,
    /// Always [`CURRENCY`].
    pub currency: &'static str,
    /// Event type.
    pub event_type: String,
    /// Attribution tag.
    pub ad_platform: Value,
    /// ISO 8601 timestamp.
    pub timestamp: String,
}

impl From<&Event> for HyrosPayload {
    fn from(event: &Event) -> Self {
        Self {
            email: present(event.email.clone()).unwrap_or_else(|| Value::from(DEFAULT_EMAIL)),
            revenue: present(event.revenue.clone()).unwrap_or_else(|| Value::from(0)),
            currency: CURRENCY,
            event_type: event
                .event_type
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            ad_platform: present(event.source.clone())
                .unwrap_or_else(|| Value::from(DEFAULT_SOURCE)),
            timestamp: event
                .timestamp
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMESTAMP.to_string()),
        }
    }
}
