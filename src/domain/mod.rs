//! Domain layer: the tracked event and its outbound wire shape.

pub mod event;

pub use event::{Event, HyrosPayload};
