//! Script store event bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StoreEvent`] -- the domain event envelope.
//! - [`EventLogger`] -- background subscriber that writes every event to
//!   the tracing log.

pub mod bus;
pub mod logger;

pub use bus::{EventBus, StoreEvent};
pub use logger::EventLogger;
