//! Lead repository — CRUD operations for the `leads` table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw lead row from the database.
#[derive(Debug, Clone)]
pub struct LeadRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub source: String,
    pub vehicle: String,
    pub issue: String,
    pub temperature: String,
    pub last_contact: String,
    pub next_follow_up: String,
    pub estimated_value: i64,
    pub response_time_hours: f64,
    pub follow_ups: i64,
    pub engagement: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl LeadRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            source: row.get("source")?,
            vehicle: row.get("vehicle")?,
            issue: row.get("issue")?,
            temperature: row.get("temperature")?,
            last_contact: row.get("last_contact")?,
            next_follow_up: row.get("next_follow_up")?,
            estimated_value: row.get("estimated_value")?,
            response_time_hours: row.get("response_time_hours")?,
            follow_ups: row.get("follow_ups")?,
            engagement: row.get("engagement")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Query filter parameters for lead listing.
#[derive(Debug, Default, Clone)]
pub struct LeadFilter {
    pub source: Option<String>,
    pub temperature: Option<String>,
    /// Matched against name, phone, and email (substring).
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Inserts a new lead row.
pub fn insert(db: &Database, lead: &LeadRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO leads (id, name, phone, email, source, vehicle, issue,
             temperature, last_contact, next_follow_up, estimated_value,
             response_time_hours, follow_ups, engagement, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                lead.id,
                lead.name,
                lead.phone,
                lead.email,
                lead.source,
                lead.vehicle,
                lead.issue,
                lead.temperature,
                lead.last_contact,
                lead.next_follow_up,
                lead.estimated_value,
                lead.response_time_hours,
                lead.follow_ups,
                lead.engagement,
                lead.notes,
                lead.created_at,
                lead.updated_at,
            ],
        )?;
        Ok(())
    })
}

/// Updates an existing lead row. All fields except `id` and `created_at` are overwritten.
pub fn update(db: &Database, lead: &LeadRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE leads SET name=?2, phone=?3, email=?4, source=?5, vehicle=?6,
             issue=?7, temperature=?8, last_contact=?9, next_follow_up=?10,
             estimated_value=?11, response_time_hours=?12, follow_ups=?13,
             engagement=?14, notes=?15, updated_at=?16
             WHERE id=?1",
            params![
                lead.id,
                lead.name,
                lead.phone,
                lead.email,
                lead.source,
                lead.vehicle,
                lead.issue,
                lead.temperature,
                lead.last_contact,
                lead.next_follow_up,
                lead.estimated_value,
                lead.response_time_hours,
                lead.follow_ups,
                lead.engagement,
                lead.notes,
                lead.updated_at,
            ],
        )?;
        Ok(())
    })
}

/// Finds a lead by its ID.
pub fn find_by_id(db: &Database, id: &str) -> Result<Option<LeadRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM leads WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], LeadRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Queries leads with filters, returning (rows, total_count).
pub fn query(db: &Database, filter: &LeadFilter) -> Result<(Vec<LeadRow>, u64), DatabaseError> {
    db.with_conn(|conn| {
        let mut conditions = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref source) = filter.source {
            conditions.push(format!("source = ?{}", param_values.len() + 1));
            param_values.push(Box::new(source.clone()));
        }
        if let Some(ref temperature) = filter.temperature {
            conditions.push(format!("temperature = ?{}", param_values.len() + 1));
            param_values.push(Box::new(temperature.clone()));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search);
            let n = param_values.len() + 1;
            conditions.push(format!(
                "(name LIKE ?{n} OR phone LIKE ?{n} OR email LIKE ?{n})"
            ));
            param_values.push(Box::new(pattern));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM leads {}", where_clause);
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let total: u64 = conn.query_row(&count_sql, params_ref.as_slice(), |r| r.get(0))?;

        let limit = filter.limit.unwrap_or(100) as i64;
        let offset = filter.offset.unwrap_or(0) as i64;
        param_values.push(Box::new(limit));
        param_values.push(Box::new(offset));
        let query_sql = format!(
            "SELECT * FROM leads {} ORDER BY next_follow_up ASC LIMIT ?{} OFFSET ?{}",
            where_clause,
            param_values.len() - 1,
            param_values.len()
        );

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&query_sql)?;
        let rows: Vec<LeadRow> = stmt
            .query_map(params_ref.as_slice(), LeadRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, total))
    })
}
