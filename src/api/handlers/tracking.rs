//! Event tracking endpoints: test trigger and purchase tracking.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{PurchaseRequest, StatusResponse};
use crate::app_state::AppState;
use crate::domain::Event;
use crate::error::RelayError;

/// `POST /test-hyros` — Send the fixed sample sale to Hyros.
///
/// Any request body is ignored.
#[utoipa::path(
    post,
    path = "/test-hyros",
    tag = "Tracking",
    summary = "Send a test event",
    description = "Forwards a hard-coded sample sale to Hyros. The request body is ignored.",
    responses(
        (status = 200, description = "Hyros accepted the event", body = StatusResponse),
        (status = 500, description = "Delivery to Hyros failed", body = StatusResponse),
    )
)]
pub async fn test_hyros(State(state): State<AppState>) -> impl IntoResponse {
    if state.forwarder.send(&Event::test_sample()).await {
        (
            StatusCode::OK,
            Json(StatusResponse::success("Test event sent to Hyros")),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusResponse::error("Failed to send to Hyros")),
        )
    }
}

/// `POST /track-purchase` — Forward a website purchase to Hyros.
///
/// # Errors
///
/// Returns [`RelayError::InvalidRequest`] if the body is present but not a
/// JSON object. Nothing is forwarded in that case.
#[utoipa::path(
    post,
    path = "/track-purchase",
    tag = "Tracking",
    summary = "Track a purchase",
    description = "Forwards a sale to Hyros. Missing fields are defaulted; an empty body counts as `{}`.",
    request_body(content = PurchaseRequest, description = "Purchase details, all optional"),
    responses(
        (status = 200, description = "Hyros accepted the purchase", body = StatusResponse),
        (status = 400, description = "Body is not a JSON object", body = StatusResponse),
        (status = 500, description = "Delivery to Hyros failed", body = StatusResponse),
    )
)]
pub async fn track_purchase(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    let req = PurchaseRequest::from_body(&body)?;
    let event = Event::purchase(req.email, req.revenue, req.source);

    if state.forwarder.send(&event).await {
        let message = format!("Purchase tracked for {}", event.email_display());
        Ok((StatusCode::OK, Json(StatusResponse::success(message))))
    } else {
        Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusResponse::error("Failed to track purchase")),
        ))
    }
}

/// Tracking routes. `/test-hyros` is only mounted when `test_endpoint` is set.
pub fn routes(test_endpoint: bool) -> Router<AppState> {
    let router = Router::new().route("/track-purchase", post(track_purchase));
    if test_endpoint {
        router.route("/test-hyros", post(test_hyros))
    } else {
        router
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::HyrosConfig;
    use crate::service::Forwarder;

    const SALE_PATH: &str = "/api/v1/sale";

    fn app(server: &MockServer, test_endpoint: bool) -> Router {
        let config = HyrosConfig::new("test-key", format!("{}{SALE_PATH}", server.uri()));
        let Ok(forwarder) = Forwarder::new(config) else {
            panic!("client should build");
        };
        routes(test_endpoint).with_state(AppState::new(forwarder))
    }

    async fn upstream_answers(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path(SALE_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()));
        let Ok(request) = request else {
            panic!("request should build");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router should answer");
        };
        let status = response.status();
        let Ok(collected) = response.into_body().collect().await else {
            panic!("body should be readable");
        };
        let json = serde_json::from_slice(&collected.to_bytes()).unwrap_or(Value::Null);
        (status, json)
    }

    async fn sent_payloads(server: &MockServer) -> Vec<Value> {
        let Some(requests) = server.received_requests().await else {
            panic!("request recording should be enabled");
        };
        requests
            .iter()
            .map(|r| r.body_json::<Value>().unwrap_or(Value::Null))
            .collect()
    }

    #[tokio::test]
    async fn track_purchase_forwards_and_echoes_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SALE_PATH))
            .and(body_json(json!({
                "email": "a@b.com",
                "revenue": 50,
                "currency": "USD",
                "event_type": "sale",
                "ad_platform": "fb_ad",
                "timestamp": "2025-10-01T21:00:00Z",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = post_json(
            app(&server, true),
            "/track-purchase",
            r#"{"email":"a@b.com","revenue":50,"source":"fb_ad"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "success", "message": "Purchase tracked for a@b.com"})
        );
    }

    #[tokio::test]
    async fn track_purchase_empty_object_uses_defaults() {
        let server = MockServer::start().await;
        upstream_answers(&server, 200).await;

        let (status, body) = post_json(app(&server, true), "/track-purchase", "{}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Purchase tracked for unknown@example.com")
        );

        assert_eq!(
            sent_payloads(&server).await,
            vec![json!({
                "email": "unknown@example.com",
                "revenue": 0,
                "currency": "USD",
                "event_type": "sale",
                "ad_platform": "website_test",
                "timestamp": "2025-10-01T21:00:00Z",
            })]
        );
    }

    #[tokio::test]
    async fn track_purchase_every_field_subset_is_fully_populated() {
        let inputs = [
            r#"{"email":"x@y.z"}"#,
            r#"{"revenue":9.99}"#,
            r#"{"source":"tiktok"}"#,
            r#"{"email":"x@y.z","revenue":1}"#,
            r#"{"email":"x@y.z","source":"tiktok"}"#,
            r#"{"revenue":1,"source":"tiktok"}"#,
        ];
        for input in inputs {
            let server = MockServer::start().await;
            upstream_answers(&server, 200).await;
            let (status, _) = post_json(app(&server, true), "/track-purchase", input).await;
            assert_eq!(status, StatusCode::OK, "{input}");

            let payloads = sent_payloads(&server).await;
            let Some(Value::Object(payload)) = payloads.first() else {
                panic!("expected one payload for {input}");
            };
            assert_eq!(payload.len(), 6, "{input}");
            for key in ["email", "revenue", "currency", "event_type", "ad_platform", "timestamp"] {
                assert!(
                    payload.get(key).is_some_and(|v| !v.is_null()),
                    "{key} missing for {input}"
                );
            }
            assert_eq!(payload.get("currency"), Some(&json!("USD")));
            assert_eq!(payload.get("event_type"), Some(&json!("sale")));
        }
    }

    #[tokio::test]
    async fn track_purchase_forwards_unexpected_value_types() {
        let server = MockServer::start().await;
        upstream_answers(&server, 200).await;

        let (status, body) = post_json(
            app(&server, true),
            "/track-purchase",
            r#"{"email":"a@b.com","revenue":"49.99"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Purchase tracked for a@b.com")
        );

        let (status, body) = post_json(app(&server, true), "/track-purchase", r#"{"email":123}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Purchase tracked for 123")
        );

        let payloads = sent_payloads(&server).await;
        assert_eq!(payloads.len(), 2);
        assert_eq!(
            payloads.first().and_then(|p| p.get("revenue")),
            Some(&json!("49.99"))
        );
        assert_eq!(
            payloads.last().and_then(|p| p.get("email")),
            Some(&json!(123))
        );
        assert_eq!(
            payloads.last().and_then(|p| p.get("revenue")),
            Some(&json!(0))
        );
    }

    #[tokio::test]
    async fn track_purchase_empty_body_counts_as_empty_object() {
        let server = MockServer::start().await;
        upstream_answers(&server, 200).await;

        let (status, body) = post_json(app(&server, true), "/track-purchase", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Purchase tracked for unknown@example.com")
        );
    }

    #[tokio::test]
    async fn track_purchase_malformed_json_is_rejected_without_forwarding() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, body) = post_json(app(&server, true), "/track-purchase", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.get("status").and_then(Value::as_str), Some("error"));
    }

    #[tokio::test]
    async fn track_purchase_upstream_failure_is_500() {
        let server = MockServer::start().await;
        upstream_answers(&server, 503).await;

        let (status, body) = post_json(
            app(&server, true),
            "/track-purchase",
            r#"{"email":"a@b.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Failed to track purchase"})
        );
    }

    #[tokio::test]
    async fn test_hyros_success() {
        let server = MockServer::start().await;
        upstream_answers(&server, 200).await;

        let (status, body) = post_json(app(&server, true), "/test-hyros", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "success", "message": "Test event sent to Hyros"})
        );
    }

    #[tokio::test]
    async fn test_hyros_failure_is_500() {
        let server = MockServer::start().await;
        upstream_answers(&server, 400).await;

        let (status, body) = post_json(app(&server, true), "/test-hyros", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Failed to send to Hyros"})
        );
    }

    #[tokio::test]
    async fn test_hyros_ignores_body_and_does_not_dedup() {
        let server = MockServer::start().await;
        upstream_answers(&server, 200).await;

        let (first, _) = post_json(app(&server, true), "/test-hyros", "").await;
        let (second, _) = post_json(
            app(&server, true),
            "/test-hyros",
            r#"{"email":"other@example.com","revenue":1}"#,
        )
        .await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);

        let payloads = sent_payloads(&server).await;
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads.first(), payloads.last());
        assert_eq!(
            payloads.first(),
            Some(&json!({
                "email": "testuser@example.com",
                "revenue": 100.0,
                "currency": "USD",
                "event_type": "sale",
                "ad_platform": "manual_test",
                "timestamp": "2025-10-01T21:00:00Z",
            }))
        );
    }

    #[tokio::test]
    async fn test_hyros_can_be_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, _) = post_json(app(&server, false), "/test-hyros", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
