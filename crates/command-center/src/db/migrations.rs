//! Database migration system.
//!
//! Tracks applied migrations in a `_migrations` table and applies pending
//! ones in order inside a transaction per migration.

use rusqlite::Connection;

use super::error::DatabaseError;

/// A single migration definition.
struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

/// All migrations in order. Each is applied at most once.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create_jobs_table",
        sql: include_str!("sql/001_create_jobs.sql"),
    },
    Migration {
        version: 2,
        description: "create_leads_table",
        sql: include_str!("sql/002_create_leads.sql"),
    },
];

/// Applies all pending migrations.
pub fn run_all(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;

    for migration in MIGRATIONS {
        if is_applied(conn, migration.version)? {
            continue;
        }

        conn.execute_batch("BEGIN")?;
        let result = apply(conn, migration);
        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")?;
                log::info!(
                    "Applied migration {} ({})",
                    migration.version,
                    migration.description
                );
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(DatabaseError::Migration {
                    version: migration.version,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn is_applied(conn: &Connection, version: u32) -> Result<bool, DatabaseError> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM _migrations WHERE version = ?1",
        [version],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

fn apply(conn: &Connection, migration: &Migration) -> Result<(), rusqlite::Error> {
    conn.execute_batch(migration.sql)?;
    conn.execute(
        "INSERT INTO _migrations (version, description, applied_at)
         VALUES (?1, ?2, datetime('now'))",
        rusqlite::params![migration.version, migration.description],
    )?;
    Ok(())
}
