//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`StoreEvent`]s, shared via
//! `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use scriptstore_core::types::DbId;
use tokio::sync::broadcast;

pub const EVENT_SCRIPT_CREATED: &str = "script.created";
pub const EVENT_SCRIPT_DELETED: &str = "script.deleted";
pub const EVENT_SCRIPT_EXECUTED: &str = "script.executed";

// ---------------------------------------------------------------------------
// StoreEvent
// ---------------------------------------------------------------------------

/// Something that happened to a script.
///
/// Constructed via [`StoreEvent::new`] and enriched with
/// [`with_version`](StoreEvent::with_version) and
/// [`with_payload`](StoreEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Dot-separated event name, e.g. `"script.created"`.
    pub event_type: String,

    /// Owner of the script and the user that caused the event.
    pub owner: DbId,

    pub script_name: String,

    /// Set when the event concerns a single version.
    pub script_version: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl StoreEvent {
    pub fn new(event_type: impl Into<String>, owner: DbId, script_name: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            owner,
            script_name: script_name.into(),
            script_version: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.script_version = Some(version.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use scriptstore_events::bus::{EventBus, StoreEvent, EVENT_SCRIPT_CREATED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(StoreEvent::new(EVENT_SCRIPT_CREATED, 1, "deploy"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: StoreEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = StoreEvent::new(EVENT_SCRIPT_EXECUTED, 7, "deploy")
            .with_version("2")
            .with_payload(serde_json::json!({"job_id": "abc"}));
        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, EVENT_SCRIPT_EXECUTED);
        assert_eq!(received.owner, 7);
        assert_eq!(received.script_name, "deploy");
        assert_eq!(received.script_version.as_deref(), Some("2"));
        assert_eq!(received.payload["job_id"], "abc");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(StoreEvent::new(EVENT_SCRIPT_DELETED, 1, "deploy"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, EVENT_SCRIPT_DELETED);
        assert_eq!(e2.event_type, EVENT_SCRIPT_DELETED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(StoreEvent::new(EVENT_SCRIPT_CREATED, 1, "orphan"));
    }

    #[test]
    fn new_event_has_empty_optional_fields() {
        let event = StoreEvent::new(EVENT_SCRIPT_CREATED, 1, "deploy");
        assert!(event.script_version.is_none());
        assert!(event.payload.is_object());
    }
}
