//! Broadcasting modules for real-time event streaming.
//!
//! This module contains broadcasters for the event types a dashboard shell
//! subscribes to. They are UI-technology agnostic: a Tauri desktop app, a
//! web socket bridge, or a test can subscribe the same way.

pub mod activity;
pub mod board_events;

pub use activity::{ActivityBroadcaster, ActivityEvent, ActivityKind};
pub use board_events::{BoardEventBroadcaster, JobMovedEvent};
