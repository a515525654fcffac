//! Job store with persistent database storage.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Stage;
use crate::db::job_repo::{self, JobFilter, JobRow};
use crate::db::{Database, DatabaseError};
use crate::jobs::{JobRecord, Priority};

// ─── Helpers ────────────────────────────────────────────────────────────────

fn parse_status(s: &str, job_id: &str) -> Stage {
    match Stage::from_id(s) {
        Some(stage) => stage,
        None => {
            log::warn!(
                "Unknown job status '{}' for job {}, defaulting to New Inquiry",
                s,
                job_id
            );
            Stage::NewInquiry
        }
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::warn!("parse_timestamp: failed to parse '{}': {}", s, e);
            Utc::now()
        })
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl JobRecord {
    /// Creates a JobRecord from a database row.
    pub fn from_job_row(row: &JobRow) -> Self {
        Self {
            id: row.id.clone(),
            customer: row.customer.clone(),
            phone: row.phone.clone(),
            vehicle: row.vehicle.clone(),
            issue: row.issue.clone(),
            status: parse_status(&row.status, &row.id),
            value: row.value.max(0) as u32,
            estimator: row.estimator.clone(),
            due_date: parse_timestamp(&row.due_date),
            priority: Priority::from_str_or_default(&row.priority),
            notes: row.notes.clone(),
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }

    fn to_job_row(&self) -> JobRow {
        JobRow {
            id: self.id.clone(),
            customer: self.customer.clone(),
            phone: self.phone.clone(),
            vehicle: self.vehicle.clone(),
            issue: self.issue.clone(),
            status: self.status.id().to_string(),
            value: self.value as i64,
            estimator: self.estimator.clone(),
            due_date: format_timestamp(self.due_date),
            priority: self.priority.as_str().to_string(),
            notes: self.notes.clone(),
            created_at: format_timestamp(self.created_at),
            updated_at: format_timestamp(self.updated_at),
        }
    }
}

// ─── Query types ────────────────────────────────────────────────────────────

/// Query parameters for job listing.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQueryParams {
    /// Matched against customer name, phone, and job id.
    pub search: Option<String>,
    /// A status label (`"Estimate"`) or stage id (`"estimate-sent"`).
    pub status: Option<String>,
    pub estimator: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Response for job listing with pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub jobs: Vec<JobRecord>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

fn resolve_status_filter(raw: &str) -> Option<Stage> {
    let stage = Stage::from_status_label(raw).or_else(|| Stage::from_id(raw));
    if stage.is_none() {
        log::warn!("Unknown status filter '{}', ignoring", raw);
    }
    stage
}

// ─── JobStore ───────────────────────────────────────────────────────────────

/// In-memory job store with optional persistent backing.
///
/// Uses `std::sync::RwLock` for both database handle and cache.
/// All database operations are synchronous and sub-millisecond. The cache
/// is the read path the board joins against; the database (when set) is
/// written through on every mutation.
pub struct JobStore {
    /// Database handle (clone is cheap — inner `Arc`).
    db: RwLock<Option<Database>>,
    /// In-memory cache, keyed by job id.
    cache: RwLock<HashMap<String, JobRecord>>,
}

impl JobStore {
    /// Creates a new job store with no database attached.
    pub fn new() -> Self {
        Self {
            db: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the database connection.
    pub fn set_database(&self, db: Database) {
        let mut guard = match self.db.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Job store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = Some(db);
    }

    /// Gets a cloned database handle if available.
    /// Database is internally `Arc`-based, so cloning is cheap.
    pub fn get_database(&self) -> Option<Database> {
        let guard = match self.db.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Job store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clone()
    }

    /// Inserts a job into the cache and persists it when a database is
    /// attached.
    pub fn insert(&self, job: JobRecord) -> Result<(), DatabaseError> {
        if let Some(db) = self.get_database() {
            job_repo::insert(&db, &job.to_job_row())?;
        }

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(job.id.clone(), job);
        }
        Ok(())
    }

    /// Returns a specific job by ID (from cache).
    pub fn get(&self, job_id: &str) -> Option<JobRecord> {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Job store cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        cache.get(job_id).cloned()
    }

    /// Returns a specific job by ID, checking cache then database.
    pub fn get_with_fallback(&self, job_id: &str) -> Option<JobRecord> {
        if let Some(job) = self.get(job_id) {
            return Some(job);
        }
        if let Some(db) = self.get_database() {
            if let Ok(Some(row)) = job_repo::find_by_id(&db, job_id) {
                return Some(JobRecord::from_job_row(&row));
            }
        }
        None
    }

    /// Returns all jobs sorted by creation time (oldest first) from cache.
    /// This is the order the board derives its lanes from.
    pub fn get_all(&self) -> Vec<JobRecord> {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Job store cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        let mut result: Vec<JobRecord> = cache.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        result
    }

    /// Query jobs with filters and pagination, preferring the database.
    pub fn query(&self, params: &JobQueryParams) -> Result<JobListResponse, DatabaseError> {
        if let Some(db) = self.get_database() {
            let filter = JobFilter {
                status: params
                    .status
                    .as_deref()
                    .and_then(resolve_status_filter)
                    .map(|s| s.id().to_string()),
                estimator: params.estimator.clone(),
                search: params.search.clone(),
                from_date: None,
                to_date: None,
                limit: params.limit,
                offset: params.offset,
            };
            let (rows, total) = job_repo::query(&db, &filter)?;
            let jobs = rows.iter().map(JobRecord::from_job_row).collect();
            Ok(JobListResponse {
                jobs,
                total,
                limit: params.limit,
                offset: params.offset,
            })
        } else {
            self.query_cache(params)
        }
    }

    /// Falls back to querying the in-memory cache.
    fn query_cache(&self, params: &JobQueryParams) -> Result<JobListResponse, DatabaseError> {
        let mut jobs = self.get_all();

        if let Some(ref search) = params.search {
            jobs.retain(|j| j.matches_search(search));
        }
        if let Some(stage) = params.status.as_deref().and_then(resolve_status_filter) {
            jobs.retain(|j| j.status == stage);
        }
        if let Some(ref estimator) = params.estimator {
            jobs.retain(|j| &j.estimator == estimator);
        }

        let total = jobs.len() as u64;
        let offset = params.offset.unwrap_or(0) as usize;
        let limit = params.limit.unwrap_or(100) as usize;
        let jobs: Vec<JobRecord> = jobs.into_iter().skip(offset).take(limit).collect();

        Ok(JobListResponse {
            jobs,
            total,
            limit: params.limit,
            offset: params.offset,
        })
    }

    /// Updates a job's status field, reflecting the change immediately in
    /// the cache and writing through to the database when attached.
    ///
    /// A persistence failure is logged but never undoes the cache update:
    /// callers of the board rely on the status being current the moment
    /// this returns.
    pub fn set_status(&self, job_id: &str, stage: Stage) -> Option<JobRecord> {
        let now = Utc::now();
        let updated = match self.cache.write() {
            Ok(mut cache) => match cache.get_mut(job_id) {
                Some(job) => {
                    job.status = stage;
                    job.updated_at = now;
                    Some(job.clone())
                }
                None => None,
            },
            Err(poisoned) => {
                log::warn!("Job store cache lock was poisoned, recovering");
                let mut cache = poisoned.into_inner();
                cache.get_mut(job_id).map(|job| {
                    job.status = stage;
                    job.updated_at = now;
                    job.clone()
                })
            }
        };

        if updated.is_none() {
            log::warn!("set_status: job {} not in store", job_id);
            return None;
        }

        if let Some(db) = self.get_database() {
            if let Err(e) =
                job_repo::update_status(&db, job_id, stage.id(), &format_timestamp(now))
            {
                log::error!("Failed to persist status for job {}: {}", job_id, e);
            }
        }

        updated
    }

    /// Removes a job from the cache and the database. Returns the removed
    /// record when it was cached.
    pub fn remove(&self, job_id: &str) -> Result<Option<JobRecord>, DatabaseError> {
        if let Some(db) = self.get_database() {
            job_repo::delete(&db, job_id)?;
        }

        let removed = match self.cache.write() {
            Ok(mut cache) => cache.remove(job_id),
            Err(poisoned) => {
                log::warn!("Job store cache lock was poisoned, recovering");
                poisoned.into_inner().remove(job_id)
            }
        };
        Ok(removed)
    }

    /// Returns the job count per stage, indexed in pipeline order.
    pub fn counts(&self) -> [usize; Stage::COUNT] {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Job store cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        let mut counts = [0usize; Stage::COUNT];
        for job in cache.values() {
            counts[job.status.index()] += 1;
        }
        counts
    }

    /// Loads persisted jobs from the database into the cache on startup.
    pub fn load_from_database(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };

        let result = job_repo::query(&db, &JobFilter::default());

        let mut loaded = 0;
        if let Ok(mut cache) = self.cache.write() {
            if let Ok((rows, _)) = result {
                for row in &rows {
                    let job = JobRecord::from_job_row(row);
                    cache.insert(job.id.clone(), job);
                    loaded += 1;
                }
            }
        }

        log::info!("Loaded {} jobs from database into cache", loaded);
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, customer: &str, status: Stage) -> JobRecord {
        JobRecord::new(id, customer, "2022 Honda Civic", "Rear bumper")
            .with_phone("(215) 555-0123")
            .with_status(status)
            .with_value(2450)
    }

    #[test]
    fn test_store_starts_empty() {
        let store = JobStore::new();
        assert!(store.get_all().is_empty());
        assert_eq!(store.counts(), [0; Stage::COUNT]);
    }

    #[test]
    fn test_insert_and_get() {
        let store = JobStore::new();
        store
            .insert(job("#CC-2026-001", "Jessica Martinez", Stage::NewInquiry))
            .unwrap();

        let found = store.get("#CC-2026-001").unwrap();
        assert_eq!(found.customer, "Jessica Martinez");
        assert!(store.get("#CC-2026-999").is_none());
    }

    #[test]
    fn test_get_all_sorted_by_creation() {
        let store = JobStore::new();
        let mut first = job("#CC-2026-001", "A", Stage::NewInquiry);
        first.created_at = Utc::now() - chrono::Duration::hours(2);
        let second = job("#CC-2026-002", "B", Stage::NewInquiry);
        store.insert(second).unwrap();
        store.insert(first).unwrap();

        let all = store.get_all();
        assert_eq!(all[0].id, "#CC-2026-001");
        assert_eq!(all[1].id, "#CC-2026-002");
    }

    #[test]
    fn test_set_status_updates_cache_immediately() {
        let store = JobStore::new();
        store
            .insert(job("#CC-2026-001", "A", Stage::NewInquiry))
            .unwrap();

        let updated = store.set_status("#CC-2026-001", Stage::EstimateSent).unwrap();
        assert_eq!(updated.status, Stage::EstimateSent);
        assert_eq!(store.get("#CC-2026-001").unwrap().status, Stage::EstimateSent);

        assert!(store.set_status("#CC-2026-999", Stage::Complete).is_none());
    }

    #[test]
    fn test_counts_by_stage() {
        let store = JobStore::new();
        store.insert(job("1", "A", Stage::NewInquiry)).unwrap();
        store.insert(job("2", "B", Stage::NewInquiry)).unwrap();
        store.insert(job("3", "C", Stage::Complete)).unwrap();

        let counts = store.counts();
        assert_eq!(counts[Stage::NewInquiry.index()], 2);
        assert_eq!(counts[Stage::Complete.index()], 1);
        assert_eq!(counts[Stage::InProgress.index()], 0);
    }

    #[test]
    fn test_query_cache_filters() {
        let store = JobStore::new();
        store.insert(job("#CC-2026-001", "Jessica Martinez", Stage::InProgress)).unwrap();
        store.insert(job("#CC-2026-002", "Mike Johnson", Stage::InProgress)).unwrap();
        store.insert(job("#CC-2026-003", "Sarah Wilson", Stage::EstimateSent)).unwrap();

        let by_status = store
            .query(&JobQueryParams {
                status: Some("In Progress".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_status.total, 2);

        // The stage id form works as well.
        let by_id = store
            .query(&JobQueryParams {
                status: Some("estimate-sent".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_id.total, 1);
        assert_eq!(by_id.jobs[0].customer, "Sarah Wilson");

        let by_search = store
            .query(&JobQueryParams {
                search: Some("mike".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_search.total, 1);
        assert_eq!(by_search.jobs[0].id, "#CC-2026-002");
    }

    #[test]
    fn test_persist_and_reload() {
        let db = Database::open_in_memory().unwrap();
        let store = JobStore::new();
        store.set_database(db.clone());

        store
            .insert(job("#CC-2026-001", "Jessica Martinez", Stage::NewInquiry))
            .unwrap();
        store.set_status("#CC-2026-001", Stage::JobScheduled);

        // A fresh store over the same database sees the persisted state.
        let reloaded = JobStore::new();
        reloaded.set_database(db);
        reloaded.load_from_database();

        let found = reloaded.get("#CC-2026-001").unwrap();
        assert_eq!(found.customer, "Jessica Martinez");
        assert_eq!(found.status, Stage::JobScheduled);
    }

    #[test]
    fn test_query_prefers_database() {
        let db = Database::open_in_memory().unwrap();
        let store = JobStore::new();
        store.set_database(db);

        store.insert(job("#CC-2026-001", "Jessica Martinez", Stage::NewInquiry)).unwrap();
        store.insert(job("#CC-2026-002", "Mike Johnson", Stage::Complete)).unwrap();

        let result = store
            .query(&JobQueryParams {
                status: Some("Delivered".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.jobs[0].id, "#CC-2026-002");
        assert_eq!(result.jobs[0].status, Stage::Complete);
    }

    #[test]
    fn test_get_with_fallback_hits_database() {
        let db = Database::open_in_memory().unwrap();
        let seed = JobStore::new();
        seed.set_database(db.clone());
        seed.insert(job("#CC-2026-001", "Jessica Martinez", Stage::NewInquiry)).unwrap();

        // New store, cold cache, same database.
        let store = JobStore::new();
        store.set_database(db);

        assert!(store.get("#CC-2026-001").is_none());
        let found = store.get_with_fallback("#CC-2026-001").unwrap();
        assert_eq!(found.customer, "Jessica Martinez");
        assert!(store.get_with_fallback("#CC-2026-999").is_none());
    }
}
