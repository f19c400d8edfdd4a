//! Session accessors.
//!
//! [`create_session`] is the form-facing entry point: it validates input and
//! fills in the id and creation time. [`add_session`] inserts a complete
//! record as-is (used by import).

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{NewSession, Session};

/// Insert a session. Fails if a session with the same id already exists.
pub fn add_session(conn: &Connection, session: &Session) -> Result<()> {
    conn.execute(
        "INSERT INTO sessions (id, date, patient_name, title, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.id,
            session.date,
            session.patient_name,
            session.title,
            session.created_at,
        ],
    )
    .with_context(|| format!("failed to add session {}", session.id))?;

    tracing::debug!(session_id = %session.id, "session added");
    Ok(())
}

/// Validate a new-session form and store it.
///
/// The patient name must not be blank and the date must be `YYYY-MM-DD`.
/// A blank title is stored as no title.
pub fn create_session(conn: &Connection, input: &NewSession) -> Result<Session> {
    let patient_name = input.patient_name.trim();
    if patient_name.is_empty() {
        bail!("patient name must not be empty");
    }

    let date = input.date.trim();
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid session date: {date:?} (expected YYYY-MM-DD)"))?;

    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    let session = Session {
        id: super::new_id(),
        date: date.to_string(),
        patient_name: patient_name.to_string(),
        title,
        created_at: super::now_millis(),
    };

    add_session(conn, &session)?;
    tracing::info!(session_id = %session.id, date = %session.date, "session created");
    Ok(session)
}

/// All sessions, newest first.
pub fn get_sessions(conn: &Connection) -> Result<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, patient_name, title, created_at FROM sessions \
         ORDER BY created_at DESC, rowid DESC",
    )?;
    let sessions = stmt
        .query_map([], row_to_session)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

/// Look up one session. Returns `None` when absent.
pub fn get_session(conn: &Connection, id: &str) -> Result<Option<Session>> {
    let session = conn
        .query_row(
            "SELECT id, date, patient_name, title, created_at FROM sessions WHERE id = ?1",
            params![id],
            row_to_session,
        )
        .optional()?;
    Ok(session)
}

/// Remove a session. Its notes and optimized note stay behind.
///
/// Returns `true` if a row was removed.
pub fn delete_session(conn: &Connection, id: &str) -> Result<bool> {
    let rows = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
    if rows > 0 {
        tracing::info!(session_id = %id, "session deleted");
    }
    Ok(rows > 0)
}

fn row_to_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        date: row.get(1)?,
        patient_name: row.get(2)?,
        title: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn form(name: &str, title: Option<&str>) -> NewSession {
        NewSession {
            date: "2024-05-02".into(),
            patient_name: name.into(),
            title: title.map(String::from),
        }
    }

    #[test]
    fn create_session_trims_and_drops_blank_title() {
        let conn = db::open_memory_database().unwrap();
        let session = create_session(&conn, &form("  Avery ", Some("   "))).unwrap();
        assert_eq!(session.patient_name, "Avery");
        assert!(session.title.is_none());

        let stored = get_session(&conn, &session.id).unwrap().unwrap();
        assert_eq!(stored, session);
    }

    #[test]
    fn create_session_rejects_blank_patient() {
        let conn = db::open_memory_database().unwrap();
        let err = create_session(&conn, &form("  ", None)).unwrap_err();
        assert!(err.to_string().contains("patient name"));
    }

    #[test]
    fn create_session_rejects_bad_date() {
        let conn = db::open_memory_database().unwrap();
        let mut input = form("Avery", None);
        input.date = "05/02/2024".into();
        assert!(create_session(&conn, &input).is_err());
    }

    #[test]
    fn add_session_rejects_duplicate_id() {
        let conn = db::open_memory_database().unwrap();
        let session = create_session(&conn, &form("Avery", None)).unwrap();
        assert!(add_session(&conn, &session).is_err());
    }

    #[test]
    fn missing_session_is_none() {
        let conn = db::open_memory_database().unwrap();
        assert!(get_session(&conn, "nope").unwrap().is_none());
        assert!(!delete_session(&conn, "nope").unwrap());
    }
}
