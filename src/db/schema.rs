//! SQL DDL for the base (v1) collections.
//!
//! Defines `schema_meta`, `sessions` and `notes`. Collections added later
//! (patients, settings, optimized notes) are created by [`super::migrations`].
//! All DDL uses `IF NOT EXISTS` for idempotent initialization.
//!
//! Records reference each other by id only. There are no foreign-key
//! constraints and no cascades: deleting a session leaves its notes in place.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Recorded therapy encounters
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    patient_name TEXT NOT NULL,
    title TEXT,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at);

-- Free-text entries attached to a session
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL,
    text TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notes_session ON notes(session_id);
"#;

/// Initialize the base tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
