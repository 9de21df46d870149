//! Call domain events

use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::events::DomainEvent;
use crate::domain::shared::value_objects::CallId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Lifecycle events published by the call registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CallEvent {
    /// A call was placed
    CallPlaced {
        call_id: CallId,
        from: String,
        to: String,
        occurred_at: DateTime<Utc>,
    },
    /// The simulator advanced a call
    CallStatusChanged {
        call_id: CallId,
        old_status: CallStatus,
        new_status: CallStatus,
        occurred_at: DateTime<Utc>,
    },
    /// A call was hung up
    CallEnded {
        call_id: CallId,
        occurred_at: DateTime<Utc>,
    },
}

impl CallEvent {
    pub fn call_id(&self) -> &CallId {
        match self {
            CallEvent::CallPlaced { call_id, .. }
            | CallEvent::CallStatusChanged { call_id, .. }
            | CallEvent::CallEnded { call_id, .. } => call_id,
        }
    }
}

impl DomainEvent for CallEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CallEvent::CallPlaced { .. } => "call.placed",
            CallEvent::CallStatusChanged { .. } => "call.status_changed",
            CallEvent::CallEnded { .. } => "call.ended",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CallEvent::CallPlaced { occurred_at, .. }
            | CallEvent::CallStatusChanged { occurred_at, .. }
            | CallEvent::CallEnded { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Event broadcaster
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<CallEvent>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event
    pub fn publish(&self, event: CallEvent) {
        // No receivers is fine
        let _ = self.tx.send(event);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.tx.subscribe()
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
