//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct provides a complete environment for exercising
//! the board end to end: an in-memory database, job and lead stores wired
//! to it, and a board controller with subscribable broadcasters.

#![allow(dead_code)]

use std::sync::Arc;

use command_center::board::{BoardController, Stage};
use command_center::broadcast::{ActivityEvent, JobMovedEvent};
use command_center::db::Database;
use command_center::jobs::{JobRecord, JobStore};
use command_center::leads::LeadStore;
use tokio::sync::broadcast::Receiver;

use super::builders::JobBuilder;

/// Test harness bundling the stores and the controller over one database.
pub struct TestHarness {
    pub db: Database,
    pub jobs: Arc<JobStore>,
    pub leads: LeadStore,
    pub controller: BoardController,
}

impl TestHarness {
    /// Create a harness with empty stores over a fresh in-memory database.
    pub fn new() -> Self {
        let db = Database::open_in_memory().expect("open in-memory DB");

        let jobs = Arc::new(JobStore::new());
        jobs.set_database(db.clone());

        let leads = LeadStore::new();
        leads.set_database(db.clone());

        let controller = BoardController::new(Arc::clone(&jobs));

        Self {
            db,
            jobs,
            leads,
            controller,
        }
    }

    /// Create a harness whose board holds the given jobs, in order.
    pub fn with_board(specs: &[(&str, Stage)]) -> Self {
        let harness = Self::new();
        let base = chrono::Utc::now();
        for (i, (id, stage)) in specs.iter().enumerate() {
            let job = JobBuilder::new(id)
                .status(*stage)
                .created_at(base + chrono::Duration::milliseconds(i as i64))
                .build();
            harness.controller.add_job(job).expect("seed job");
        }
        harness
    }

    /// Create a harness seeded with the demo dataset.
    pub fn seeded() -> Self {
        let harness = Self::new();
        command_center::demo::seed_job_store(&harness.jobs).expect("seed jobs");
        command_center::demo::seed_lead_store(&harness.leads).expect("seed leads");
        harness.controller.sync_from_store();
        harness
    }

    /// Subscribe to move notifications.
    pub fn move_events(&self) -> Receiver<JobMovedEvent> {
        self.controller.events().subscribe()
    }

    /// Subscribe to the activity feed.
    pub fn activity_events(&self) -> Receiver<ActivityEvent> {
        self.controller.activity().subscribe()
    }

    /// Job ids in one lane, in order.
    pub fn lane_ids(&self, stage: Stage) -> Vec<String> {
        self.controller
            .get_stage(stage)
            .jobs
            .iter()
            .map(|j| j.id.clone())
            .collect()
    }

    /// Every job id on the board, lane by lane in pipeline order.
    pub fn all_board_ids(&self) -> Vec<String> {
        Stage::ALL
            .into_iter()
            .flat_map(|s| self.lane_ids(s))
            .collect()
    }

    /// Asserts the partition invariant: every stored job appears on the
    /// board exactly once.
    pub fn assert_partition(&self) {
        let mut board_ids = self.all_board_ids();
        let before_dedup = board_ids.len();
        board_ids.sort();
        board_ids.dedup();
        assert_eq!(board_ids.len(), before_dedup, "a job id appears twice");

        let mut store_ids: Vec<String> =
            self.jobs.get_all().into_iter().map(|j| j.id).collect();
        store_ids.sort();
        assert_eq!(board_ids, store_ids, "board and store disagree");
    }

    /// The persisted status (stage id column) of a job, read from a cold
    /// store over the same database.
    pub fn persisted_status(&self, job_id: &str) -> Option<Stage> {
        let cold = JobStore::new();
        cold.set_database(self.db.clone());
        cold.get_with_fallback(job_id).map(|j| j.status)
    }

    /// Shorthand lookup in the live store.
    pub fn job(&self, job_id: &str) -> JobRecord {
        self.jobs
            .get(job_id)
            .unwrap_or_else(|| panic!("job {} not in store", job_id))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
