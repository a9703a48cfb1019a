//! Tracking request and response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::RelayError;

/// Request body for `POST /track-purchase`.
///
/// Every field is optional; `null` counts as absent and unknown fields are
/// ignored. Values are not type-checked: a string revenue or a numeric
/// email is forwarded as sent.
#[derive(Debug, Clone, Default, PartialEq, ToSchema)]
pub struct PurchaseRequest {
    /// Buyer email. Defaults to `unknown@example.com`.
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
    /// Sale amount. Defaults to `0`.
    #[schema(value_type = Option<f64>)]
    pub revenue: Option<Value>,
    /// Attribution tag. Defaults to `website_test`.
    #[schema(value_type = Option<String>)]
    pub source: Option<Value>,
}

impl PurchaseRequest {
    /// Parses a raw request body.
    ///
    /// An empty or whitespace-only body is treated as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidRequest`] if the body is not JSON or is
    /// not a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(RelayError::InvalidRequest(
                "expected a JSON object".to_string(),
            ));
        };

        Ok(Self {
            email: take_present(&mut fields, "email"),
            revenue: take_present(&mut fields, "revenue"),
            source: take_present(&mut fields, "source"),
        })
    }
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|v| !v.is_null())
}

/// Response body shared by every tracking endpoint.
///
/// ```json
/// { "status": "success", "message": "Purchase tracked for a@b.com" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Human-readable outcome.
    pub message: String,
}

impl StatusResponse {
    /// A `"success"` response.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    /// An `"error"` response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
