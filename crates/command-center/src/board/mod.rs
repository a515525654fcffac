//! The job-status board: stages, the ordered partition, and its controller.

pub mod controller;
pub mod error;
pub mod partition;
pub mod stage;

pub use controller::{BoardController, StageView};
pub use error::BoardError;
pub use partition::{Board, MoveOutcome};
pub use stage::Stage;
