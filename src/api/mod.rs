//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! All endpoints are mounted at the root, matching the paths existing
//! website integrations already post to.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::RelayConfig;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "hyros-relay", description = "Forwards purchase events to Hyros"),
    paths(
        handlers::tracking::test_hyros,
        handlers::tracking::track_purchase,
        handlers::system::health_handler,
    ),
    components(schemas(dto::PurchaseRequest, dto::StatusResponse, handlers::system::HealthResponse)),
    tags(
        (name = "Tracking", description = "Event forwarding"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router(config: &RelayConfig) -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::tracking::routes(config.test_endpoint_enabled))
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
