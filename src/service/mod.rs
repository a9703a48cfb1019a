//! Service layer: postback delivery.
//!
//! [`Forwarder`] turns an [`crate::domain::Event`] into a Hyros payload and
//! performs the single outbound call.

pub mod forwarder;

pub use forwarder::Forwarder;
