use std::sync::Arc;

use scriptstore_core::scripts::ScriptStore;
use scriptstore_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Script storage and execution dispatch.
    pub store: Arc<ScriptStore>,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Event bus for publishing script events.
    pub event_bus: Arc<EventBus>,
}
