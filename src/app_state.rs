//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::Forwarder;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Postback sender shared by both entry points.
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    /// Wraps `forwarder` for sharing across handlers.
    #[must_use]
    pub fn new(forwarder: Forwarder) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
        }
    }
}
