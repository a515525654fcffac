//! Board event broadcaster for real-time move notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::board::Stage;

/// Emitted once per successful cross-stage move.
///
/// `stage` carries the destination stage title (what a toast would show),
/// `status` the new value of the job record's status field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMovedEvent {
    pub job_id: String,
    /// Destination stage title, e.g. `Estimate Sent`.
    pub stage: String,
    /// Source stage title.
    pub from_stage: String,
    /// The job's new status label, e.g. `Estimate`.
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl JobMovedEvent {
    /// Creates a move event for a job relocated from `from` to `to`.
    pub fn new(job_id: &str, from: Stage, to: Stage) -> Self {
        Self {
            job_id: job_id.to_string(),
            stage: to.title().to_string(),
            from_stage: from.title().to_string(),
            status: to.status_label().to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Broadcasts board move events to subscribers (toast sinks, activity
/// loggers, remote views).
///
/// Sending is fire-and-forget: a send with no receivers, or a receiver
/// that lags and misses events, never affects the board mutation that
/// produced the event.
#[derive(Clone)]
pub struct BoardEventBroadcaster {
    sender: Arc<broadcast::Sender<JobMovedEvent>>,
}

impl BoardEventBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends a move event to all subscribers.
    pub fn send(&self, event: JobMovedEvent) {
        // Ignore errors - no active receivers is fine
        let _ = self.sender.send(event);
    }

    /// Creates a new subscriber for move events.
    pub fn subscribe(&self) -> broadcast::Receiver<JobMovedEvent> {
        self.sender.subscribe()
    }
}

impl Default for BoardEventBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}
