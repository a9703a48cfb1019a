//! Data Transfer Objects for REST request/response serialization.

pub mod tracking_dto;

pub use tracking_dto::*;
