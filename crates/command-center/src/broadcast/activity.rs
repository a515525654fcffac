//! Activity feed broadcasting for the dashboard's recent-activity stream.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Category of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Job,
    Lead,
    Quote,
    System,
}

/// One entry in the activity feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub message: String,
}

impl ActivityEvent {
    pub fn new(kind: ActivityKind, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            message: message.to_string(),
        }
    }
}

/// Broadcasts activity entries for streaming into a feed or toast sink.
#[derive(Clone)]
pub struct ActivityBroadcaster {
    sender: broadcast::Sender<ActivityEvent>,
}

impl ActivityBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn send(&self, event: ActivityEvent) {
        // Ignore errors - no active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
        self.sender.subscribe()
    }

    pub fn job(&self, message: &str) {
        self.send(ActivityEvent::new(ActivityKind::Job, message));
    }

    pub fn lead(&self, message: &str) {
        self.send(ActivityEvent::new(ActivityKind::Lead, message));
    }

    pub fn quote(&self, message: &str) {
        self.send(ActivityEvent::new(ActivityKind::Quote, message));
    }

    pub fn system(&self, message: &str) {
        self.send(ActivityEvent::new(ActivityKind::System, message));
    }
}

impl Default for ActivityBroadcaster {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_event_creation() {
        let event = ActivityEvent::new(ActivityKind::Job, "Job moved to Estimate Sent");
        assert_eq!(event.kind, ActivityKind::Job);
        assert_eq!(event.message, "Job moved to Estimate Sent");
    }

    #[test]
    fn test_convenience_methods_tag_the_kind() {
        let broadcaster = ActivityBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        broadcaster.quote("Quote sent to Mike Johnson");
        broadcaster.lead("Lead L002 marked Warm");

        assert_eq!(rx.try_recv().unwrap().kind, ActivityKind::Quote);
        assert_eq!(rx.try_recv().unwrap().kind, ActivityKind::Lead);
    }

    #[test]
    fn test_send_without_receivers_is_fine() {
        let broadcaster = ActivityBroadcaster::default();
        broadcaster.system("Workers started");
    }
}
