//! Optimized-note accessors.
//!
//! A session has at most one optimized note. Saving looks up the existing
//! record for the session and overwrites it in place (keeping its id), or
//! inserts when there is none. Both steps share one transaction.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::OptimizedNote;

/// Upsert the optimized note for `note.session_id`. Returns the stored record,
/// whose id is the pre-existing one when an earlier summary was replaced.
pub fn save_optimized_note(conn: &mut Connection, note: &OptimizedNote) -> Result<OptimizedNote> {
    let tx = conn.transaction()?;

    let existing_id: Option<String> = tx
        .query_row(
            "SELECT id FROM optimized_notes WHERE session_id = ?1 ORDER BY timestamp DESC LIMIT 1",
            params![note.session_id],
            |row| row.get(0),
        )
        .optional()?;

    let stored = match existing_id {
        Some(id) => {
            tx.execute(
                "UPDATE optimized_notes SET content = ?1, timestamp = ?2 WHERE id = ?3",
                params![note.content, note.timestamp, id],
            )?;
            tracing::debug!(session_id = %note.session_id, id = %id, "optimized note replaced");
            OptimizedNote {
                id,
                ..note.clone()
            }
        }
        None => {
            tx.execute(
                "INSERT INTO optimized_notes (id, session_id, content, timestamp) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![note.id, note.session_id, note.content, note.timestamp],
            )?;
            tracing::debug!(session_id = %note.session_id, id = %note.id, "optimized note added");
            note.clone()
        }
    };

    tx.commit()?;
    Ok(stored)
}

/// The optimized note for a session, if one has been saved.
pub fn get_optimized_note(conn: &Connection, session_id: &str) -> Result<Option<OptimizedNote>> {
    let note = conn
        .query_row(
            "SELECT id, session_id, content, timestamp FROM optimized_notes \
             WHERE session_id = ?1 ORDER BY timestamp DESC LIMIT 1",
            params![session_id],
            row_to_optimized,
        )
        .optional()?;
    Ok(note)
}

/// Every optimized note, oldest first.
pub fn get_all_optimized_notes(conn: &Connection) -> Result<Vec<OptimizedNote>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, content, timestamp FROM optimized_notes ORDER BY timestamp",
    )?;
    let notes = stmt
        .query_map([], row_to_optimized)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

fn row_to_optimized(row: &Row) -> rusqlite::Result<OptimizedNote> {
    Ok(OptimizedNote {
        id: row.get(0)?,
        session_id: row.get(1)?,
        content: row.get(2)?,
        timestamp: row.get(3)?,
    })
}
