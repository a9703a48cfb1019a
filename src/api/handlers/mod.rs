//! REST endpoint handlers.

pub mod system;
pub mod tracking;
