//! Event log subscriber.
//!
//! [`EventLogger`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! writes each [`StoreEvent`] as a structured tracing record. It runs as a
//! long-lived background task and stops when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::StoreEvent;

pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop until the channel closes.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<StoreEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        target: "scriptstore::events",
                        event_type = %event.event_type,
                        owner = event.owner,
                        script = %event.script_name,
                        version = ?event.script_version,
                        payload = %event.payload,
                        "Store event"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
        logged
    }
}
