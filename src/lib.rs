//! # hyros-relay
//!
//! HTTP relay that forwards purchase and test events to the Hyros
//! server-to-server postback API.
//!
//! Inbound events are reshaped into the fixed six-field Hyros sale payload
//! and posted upstream once. There is no queue, retry or persistence; the
//! caller learns from the status code whether Hyros accepted the event.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)   /test-hyros, /track-purchase, /health
//!     │
//!     ├── Forwarder (service/)
//!     ├── Event → HyrosPayload (domain/)
//!     │
//!     └── POST https://app.hyros.com/api/v1/sale
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
