//! Broadcast fan-out of engine change records.

use saga_core::{ChangeEvent, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A change record with its position in the service's event sequence and the
/// engine time at which it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub seq: u64,
    pub at: Timestamp,
    pub change: ChangeEvent,
}

/// Best-effort broadcast bus for change records. Slow subscribers lose the
/// oldest events; the authoritative history is the state itself.
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn publish(&self, envelope: EventEnvelope) {
        if self.sender.send(envelope).is_err() {
            // No subscribers; normal when nothing is listening yet.
            tracing::trace!("no event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
