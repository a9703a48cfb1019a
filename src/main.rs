//! hyros-relay server entry point.
//!
//! Starts the Axum HTTP server with the tracking endpoints.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hyros_relay::api;
use hyros_relay::app_state::AppState;
use hyros_relay::config::RelayConfig;
use hyros_relay::service::Forwarder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(addr = %config.listen_addr, "starting hyros-relay");
    if config.hyros.api_key.is_empty() {
        tracing::warn!("HYROS_API_KEY is not set; postbacks will be rejected upstream");
    }

    // Build service layer
    let forwarder = Forwarder::new(config.hyros.clone())?;
    tracing::info!(
        upstream = %forwarder.config().postback_url,
        test_endpoint = config.test_endpoint_enabled,
        "forwarder ready"
    );

    // Build router
    let app = Router::new()
        .merge(api::build_router(&config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(forwarder));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
