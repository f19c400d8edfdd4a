use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, Row};

use super::types::Note;

/// Insert a note. Fails on a duplicate id.
pub fn add_note(conn: &Connection, note: &Note) -> Result<()> {
    conn.execute(
        "INSERT INTO notes (id, session_id, text, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![note.id, note.session_id, note.text, note.timestamp],
    )
    .with_context(|| format!("failed to add note {}", note.id))?;
    Ok(())
}

/// Trim `text` and store it as a new note on `session_id`.
///
/// The session is not checked for existence.
pub fn record_note(conn: &Connection, session_id: &str, text: &str) -> Result<Note> {
    let text = text.trim();
    if text.is_empty() {
        bail!("note text must not be empty");
    }

    let note = Note {
        id: super::new_id(),
        session_id: session_id.to_string(),
        text: text.to_string(),
        timestamp: super::now_millis(),
    };
    add_note(conn, &note)?;

    tracing::debug!(
        note_id = %note.id,
        session_id = %session_id,
        len = text.len(),
        "note recorded"
    );
    Ok(note)
}

/// Write a note, replacing any stored note with the same id.
pub fn update_note(conn: &Connection, note: &Note) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO notes (id, session_id, text, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![note.id, note.session_id, note.text, note.timestamp],
    )
    .with_context(|| format!("failed to update note {}", note.id))?;
    tracing::debug!(note_id = %note.id, "note updated");
    Ok(())
}

/// Remove a note. Returns `true` if a row was removed.
pub fn delete_note(conn: &Connection, note_id: &str) -> Result<bool> {
    let rows = conn.execute("DELETE FROM notes WHERE id = ?1", params![note_id])?;
    tracing::debug!(note_id = %note_id, removed = rows > 0, "note delete");
    Ok(rows > 0)
}

/// Notes of one session, oldest first.
pub fn get_notes(conn: &Connection, session_id: &str) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, text, timestamp FROM notes WHERE session_id = ?1 \
         ORDER BY timestamp ASC, rowid ASC",
    )?;
    let notes = stmt
        .query_map(params![session_id], row_to_note)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

/// Every note across all sessions, oldest first.
pub fn get_all_notes(conn: &Connection) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, text, timestamp FROM notes ORDER BY timestamp ASC, rowid ASC",
    )?;
    let notes = stmt
        .query_map([], row_to_note)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

/// Note texts joined by newlines, the payload sent for optimization.
pub fn join_note_texts(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|n| n.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        session_id: row.get(1)?,
        text: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn note(id: &str, session: &str, text: &str, ts: i64) -> Note {
        Note {
            id: id.into(),
            session_id: session.into(),
            text: text.into(),
            timestamp: ts,
        }
    }

    #[test]
    fn record_note_trims_text() {
        let conn = db::open_memory_database().unwrap();
        let n = record_note(&conn, "s1", "  mand trial 3/5  ").unwrap();
        assert_eq!(n.text, "mand trial 3/5");
        assert_eq!(get_notes(&conn, "s1").unwrap(), vec![n]);
    }

    #[test]
    fn record_note_rejects_blank() {
        let conn = db::open_memory_database().unwrap();
        assert!(record_note(&conn, "s1", " \t ").is_err());
        assert!(get_notes(&conn, "s1").unwrap().is_empty());
    }

    #[test]
    fn get_notes_orders_by_timestamp_and_filters_session() {
        let conn = db::open_memory_database().unwrap();
        add_note(&conn, &note("b", "s1", "second", 20)).unwrap();
        add_note(&conn, &note("a", "s1", "first", 10)).unwrap();
        add_note(&conn, &note("c", "s2", "other", 5)).unwrap();

        let texts: Vec<String> = get_notes(&conn, "s1")
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn update_and_delete() {
        let conn = db::open_memory_database().unwrap();
        let mut n = note("a", "s1", "draft", 10);
        add_note(&conn, &n).unwrap();

        n.text = "final".into();
        update_note(&conn, &n).unwrap();
        assert_eq!(get_notes(&conn, "s1").unwrap()[0].text, "final");

        assert!(delete_note(&conn, "a").unwrap());
        assert!(!delete_note(&conn, "a").unwrap());
        assert!(get_notes(&conn, "s1").unwrap().is_empty());
    }

    #[test]
    fn join_uses_newlines() {
        let notes = vec![note("a", "s", "one", 1), note("b", "s", "two", 2)];
        assert_eq!(join_note_texts(&notes), "one\ntwo");
        assert_eq!(join_note_texts(&[]), "");
    }
}
