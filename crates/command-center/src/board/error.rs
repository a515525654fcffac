//! Board error types.

use thiserror::Error;

use super::Stage;

/// Errors from board operations.
///
/// All variants are local, recoverable conditions surfaced to the caller;
/// none should take the hosting process down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The referenced job was not found at its expected source stage.
    /// The caller's view of the board is outdated; re-derive and retry.
    #[error("Job '{job_id}' is not in stage '{stage}' (stale board state)")]
    StaleMove { job_id: String, stage: Stage },

    /// A stage id string did not resolve to a known stage. This is a
    /// caller bug, not a retryable condition.
    #[error("Unknown stage id '{0}'")]
    UnknownStage(String),

    /// The destination index was outside the valid bound for the
    /// destination lane. Rejected rather than clamped so caller bugs
    /// surface instead of being masked.
    #[error("Index {index} out of range for stage '{stage}' (max {max})")]
    IndexOutOfRange {
        stage: Stage,
        index: usize,
        max: usize,
    },
}
