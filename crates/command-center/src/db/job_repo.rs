//! Job repository — CRUD operations for the `jobs` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw job row from the database.
#[derive(Debug, Clone)]
pub struct JobRow {
    pub id: String,
    pub customer: String,
    pub phone: String,
    pub vehicle: String,
    pub issue: String,
    /// Stage id, e.g. `in-progress`.
    pub status: String,
    pub value: i64,
    pub estimator: String,
    pub due_date: String,
    pub priority: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl JobRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            customer: row.get("customer")?,
            phone: row.get("phone")?,
            vehicle: row.get("vehicle")?,
            issue: row.get("issue")?,
            status: row.get("status")?,
            value: row.get("value")?,
            estimator: row.get("estimator")?,
            due_date: row.get("due_date")?,
            priority: row.get("priority")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Query filter parameters for job listing.
#[derive(Debug, Default, Clone)]
pub struct JobFilter {
    /// Stage id to match exactly.
    pub status: Option<String>,
    pub estimator: Option<String>,
    /// Matched against customer, phone, and id (substring).
    pub search: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Inserts a new job row.
pub fn insert(db: &Database, job: &JobRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO jobs (id, customer, phone, vehicle, issue, status, value,
             estimator, due_date, priority, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                job.id,
                job.customer,
                job.phone,
                job.vehicle,
                job.issue,
                job.status,
                job.value,
                job.estimator,
                job.due_date,
                job.priority,
                job.notes,
                job.created_at,
                job.updated_at,
            ],
        )?;
        Ok(())
    })
}

/// Updates an existing job row. All fields except `id` and `created_at` are overwritten.
pub fn update(db: &Database, job: &JobRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE jobs SET customer=?2, phone=?3, vehicle=?4, issue=?5, status=?6,
             value=?7, estimator=?8, due_date=?9, priority=?10, notes=?11, updated_at=?12
             WHERE id=?1",
            params![
                job.id,
                job.customer,
                job.phone,
                job.vehicle,
                job.issue,
                job.status,
                job.value,
                job.estimator,
                job.due_date,
                job.priority,
                job.notes,
                job.updated_at,
            ],
        )?;
        Ok(())
    })
}

/// Finds a job by its ID.
pub fn find_by_id(db: &Database, id: &str) -> Result<Option<JobRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM jobs WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], JobRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Queries jobs with filters, returning (rows, total_count).
pub fn query(db: &Database, filter: &JobFilter) -> Result<(Vec<JobRow>, u64), DatabaseError> {
    db.with_conn(|conn| {
        let mut conditions = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref status) = filter.status {
            conditions.push(format!("status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(status.clone()));
        }
        if let Some(ref estimator) = filter.estimator {
            conditions.push(format!("estimator = ?{}", param_values.len() + 1));
            param_values.push(Box::new(estimator.clone()));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search);
            let n = param_values.len() + 1;
            conditions.push(format!(
                "(customer LIKE ?{n} OR phone LIKE ?{n} OR id LIKE ?{n})"
            ));
            param_values.push(Box::new(pattern));
        }
        if let Some(ref from_date) = filter.from_date {
            conditions.push(format!("created_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(from_date.clone()));
        }
        if let Some(ref to_date) = filter.to_date {
            conditions.push(format!("created_at <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(to_date.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Count total matching rows.
        let count_sql = format!("SELECT COUNT(*) FROM jobs {}", where_clause);
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let total: u64 = conn.query_row(&count_sql, params_ref.as_slice(), |r| r.get(0))?;

        // Fetch paginated results.
        let limit = filter.limit.unwrap_or(100) as i64;
        let offset = filter.offset.unwrap_or(0) as i64;
        param_values.push(Box::new(limit));
        param_values.push(Box::new(offset));
        let query_sql = format!(
            "SELECT * FROM jobs {} ORDER BY created_at ASC LIMIT ?{} OFFSET ?{}",
            where_clause,
            param_values.len() - 1,
            param_values.len()
        );

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&query_sql)?;
        let rows: Vec<JobRow> = stmt
            .query_map(params_ref.as_slice(), JobRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, total))
    })
}

/// Deletes a job row. Deleting a missing id is not an error.
pub fn delete(db: &Database, id: &str) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM jobs WHERE id = ?1", params![id])?;
        Ok(())
    })
}

/// Counts jobs with the given stage id.
pub fn count_by_status(db: &Database, status: &str) -> Result<u64, DatabaseError> {
    db.with_conn(|conn| {
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM jobs WHERE status = ?1",
            params![status],
            |r| r.get(0),
        )?;
        Ok(count)
    })
}

/// Updates only the status and updated_at of a job.
pub fn update_status(
    db: &Database,
    id: &str,
    status: &str,
    updated_at: &str,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE jobs SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status, updated_at],
        )?;
        Ok(())
    })
}
