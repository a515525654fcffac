//! command-center
//!
//! Core building blocks for the Collision Club Command Center: the
//! job-status board with its single move operation, job and lead stores
//! with SQLite persistence, move/activity broadcasting, the quote engine,
//! the estimator leaderboard, and the operator radar.
//!
//! The crate is UI-technology independent. A desktop or web shell renders
//! [`board::StageView`]s, issues [`board::BoardController::move_job`] calls
//! from drag gestures, and subscribes to the broadcast channels for toasts
//! and activity feeds.

pub mod board;
pub mod broadcast;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod estimators;
pub mod jobs;
pub mod leads;
pub mod logging;
pub mod quotes;
pub mod radar;

pub use board::{Board, BoardController, BoardError, MoveOutcome, Stage, StageView};
pub use broadcast::{ActivityBroadcaster, ActivityEvent, BoardEventBroadcaster, JobMovedEvent};
pub use config::{load_config, ShopConfig};
pub use error::{CommandCenterError, ConfigError, Result};
pub use estimators::{leaderboard, Estimator, RankedEstimator};
pub use jobs::{JobRecord, JobStore, Priority};
pub use leads::{confidence_score, Lead, LeadSource, LeadStore};
pub use quotes::{CompetitorQuote, Quote, QuoteBuilder};
