//! Board controller: the single mutation entry point for the stage
//! partition.

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::board::{Board, BoardError, MoveOutcome, Stage};
use crate::broadcast::{ActivityBroadcaster, BoardEventBroadcaster, JobMovedEvent};
use crate::db::DatabaseError;
use crate::jobs::{JobRecord, JobStore};

/// One rendered column: a stage joined with its full job records, in lane
/// order. Read-only snapshot; reordering goes through the controller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub stage: Stage,
    pub title: &'static str,
    pub jobs: Vec<JobRecord>,
}

/// Owns the authoritative stage partition and coordinates every move with
/// the job store and the notification channels.
///
/// Moves execute synchronously to completion; the notification side effects
/// are fire-and-forget sends whose failure never rolls back a move.
pub struct BoardController {
    board: RwLock<Board>,
    store: Arc<JobStore>,
    events: BoardEventBroadcaster,
    activity: ActivityBroadcaster,
}

impl BoardController {
    /// Creates a controller over a store, deriving the initial partition
    /// from the jobs it currently holds.
    pub fn new(store: Arc<JobStore>) -> Self {
        Self::with_broadcasters(
            store,
            BoardEventBroadcaster::default(),
            ActivityBroadcaster::default(),
        )
    }

    /// Creates a controller wired to existing broadcasters (shared with the
    /// rest of the application state).
    pub fn with_broadcasters(
        store: Arc<JobStore>,
        events: BoardEventBroadcaster,
        activity: ActivityBroadcaster,
    ) -> Self {
        let board = Board::from_jobs(&store.get_all());
        Self {
            board: RwLock::new(board),
            store,
            events,
            activity,
        }
    }

    /// The move-notification channel.
    pub fn events(&self) -> &BoardEventBroadcaster {
        &self.events
    }

    /// The activity feed.
    pub fn activity(&self) -> &ActivityBroadcaster {
        &self.activity
    }

    fn read_board(&self) -> std::sync::RwLockReadGuard<'_, Board> {
        match self.board.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Board lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_board(&self) -> std::sync::RwLockWriteGuard<'_, Board> {
        match self.board.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Board lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Re-derives the partition from the store, discarding manual lane
    /// order. Used after bulk loads (e.g. `JobStore::load_from_database`).
    pub fn sync_from_store(&self) {
        let board = Board::from_jobs(&self.store.get_all());
        *self.write_board() = board;
    }

    /// Adds a newly created job to the store and to the end of its stage's
    /// lane.
    pub fn add_job(&self, job: JobRecord) -> Result<(), DatabaseError> {
        let stage = job.status;
        let id = job.id.clone();
        self.store.insert(job)?;
        self.write_board().insert(stage, &id);
        tracing::debug!(job_id = %id, stage = %stage, "job added to board");
        Ok(())
    }

    /// Moves a job between (or within) stages. See [`Board::move_job`] for
    /// the index convention and validation rules.
    ///
    /// On a successful cross-stage move the job record's status is updated
    /// in the store before this returns, and one [`JobMovedEvent`] plus one
    /// activity entry are emitted. Same-stage drops back onto the source
    /// position mutate nothing and emit nothing.
    pub fn move_job(
        &self,
        job_id: &str,
        from: Stage,
        to: Stage,
        to_index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let outcome = self.write_board().move_job(job_id, from, to, to_index)?;

        match outcome {
            MoveOutcome::Relocated { from, to, .. } => {
                self.store.set_status(job_id, to);
                self.events.send(JobMovedEvent::new(job_id, from, to));
                self.activity
                    .job(&format!("Job moved to {}", to.title()));
                tracing::info!(job_id, from = %from, to = %to, "job relocated");
            }
            MoveOutcome::Reordered {
                stage,
                from_index,
                to_index,
            } => {
                tracing::debug!(job_id, stage = %stage, from_index, to_index, "lane reordered");
            }
            MoveOutcome::Unchanged => {
                tracing::debug!(job_id, "drop on source position, no-op");
            }
        }

        Ok(outcome)
    }

    /// String-boundary variant of [`BoardController::move_job`] for callers
    /// that hold raw drop-target ids (the view layer's drag events).
    pub fn move_job_by_id(
        &self,
        job_id: &str,
        from_id: &str,
        to_id: &str,
        to_index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let from = Stage::from_id(from_id)
            .ok_or_else(|| BoardError::UnknownStage(from_id.to_string()))?;
        let to =
            Stage::from_id(to_id).ok_or_else(|| BoardError::UnknownStage(to_id.to_string()))?;
        self.move_job(job_id, from, to, to_index)
    }

    /// Returns one stage's lane joined with full job records.
    ///
    /// Ids without a backing record (a job deleted out from under the
    /// board) are skipped with a warning rather than surfaced as holes.
    pub fn get_stage(&self, stage: Stage) -> StageView {
        let lane: Vec<String> = self.read_board().lane(stage).to_vec();
        let mut jobs = Vec::with_capacity(lane.len());
        for id in &lane {
            match self.store.get_with_fallback(id) {
                Some(job) => jobs.push(job),
                None => log::warn!("Board lane '{}' references missing job {}", stage.id(), id),
            }
        }
        StageView {
            stage,
            title: stage.title(),
            jobs,
        }
    }

    /// All five columns in pipeline order.
    pub fn stage_views(&self) -> Vec<StageView> {
        Stage::ALL.into_iter().map(|s| self.get_stage(s)).collect()
    }

    /// Locates a job on the board.
    pub fn position_of(&self, job_id: &str) -> Option<(Stage, usize)> {
        self.read_board().position_of(job_id)
    }
}
