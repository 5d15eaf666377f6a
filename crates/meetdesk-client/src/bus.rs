//! The "meetings changed" channel.
//!
//! Anything that mutates the meeting collection publishes a
//! [`MeetingsChanged`]; every view interested in the list subscribes and
//! reloads. Publishing with no subscriber is fine.

use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast buffer. Lagging subscribers skip old events.
const BUS_CAPACITY: usize = 16;

/// What happened to the meeting collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeReason {
    Created,
    Updated,
    Deleted,
}

/// Notice that the server-side meeting collection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingsChanged {
    pub reason: ChangeReason,
    /// Identifier of the affected meeting, when known.
    pub meeting_id: Option<String>,
}

impl MeetingsChanged {
    pub fn new(reason: ChangeReason) -> Self {
        Self {
            reason,
            meeting_id: None,
        }
    }

    pub fn with_meeting_id(mut self, id: impl Into<String>) -> Self {
        self.meeting_id = Some(id.into());
        self
    }
}

/// Cloneable handle to the bus.
#[derive(Debug, Clone)]
pub struct MeetingsBus {
    tx: broadcast::Sender<MeetingsChanged>,
}

impl MeetingsBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publishes a change and returns how many subscribers received it.
    pub fn publish(&self, event: MeetingsChanged) -> usize {
        let receivers = self.tx.send(event.clone()).unwrap_or(0);
        debug!(reason = ?event.reason, id = ?event.meeting_id, receivers, "meetings changed");
        receivers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MeetingsChanged> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MeetingsBus {
    fn default() -> Self {
        Self::new()
    }
}
