pub mod migrations;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

/// Open (or create) the notes database at the given path with the schema
/// initialized and all migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // WAL lets `scribe serve` and an interactive session share the file
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.busy_timeout(std::time::Duration::from_millis(5000))?;

    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open a fully migrated in-memory database. Used by tests and dry runs.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;
    Ok(conn)
}

/// Result of [`check_database_health`].
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub schema_version: u32,
    pub session_count: u64,
    pub note_count: u64,
    pub optimized_note_count: u64,
    pub patient_count: u64,
    /// Notes whose session row no longer exists.
    pub orphan_note_count: u64,
    pub has_api_key: bool,
}

/// Run `PRAGMA integrity_check` and gather per-collection row counts.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let integrity_details: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .context("integrity check failed to run")?;
    let integrity_ok = integrity_details == "ok";

    let schema_version = migrations::get_schema_version(conn)?;

    let count = |table: &str| -> Result<u64> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as u64)
    };

    let orphan_note_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notes WHERE session_id NOT IN (SELECT id FROM sessions)",
        [],
        |row| row.get(0),
    )?;

    let has_api_key: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM settings \
         WHERE openai_api_key IS NOT NULL AND openai_api_key != ''",
        [],
        |row| row.get(0),
    )?;

    Ok(HealthReport {
        integrity_ok,
        integrity_details,
        schema_version,
        session_count: count("sessions")?,
        note_count: count("notes")?,
        optimized_note_count: count("optimized_notes")?,
        patient_count: count("patients")?,
        orphan_note_count: orphan_note_count as u64,
        has_api_key,
    })
}
