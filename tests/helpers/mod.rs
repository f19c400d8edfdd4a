#![allow(dead_code)]

use rusqlite::Connection;
use scribe::db;
use scribe::store::types::{NewSession, Note, Session};
use scribe::store::{notes, sessions, settings};

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    conn
}

/// Create a session for `patient` dated 2024-06-01. Returns the stored record.
pub fn insert_session(conn: &Connection, patient: &str) -> Session {
    sessions::create_session(
        conn,
        &NewSession {
            date: "2024-06-01".into(),
            patient_name: patient.into(),
            title: None,
        },
    )
    .unwrap()
}

/// Insert a note with an explicit id and timestamp so ordering is deterministic.
pub fn insert_note(
    conn: &Connection,
    session_id: &str,
    id: &str,
    text: &str,
    timestamp: i64,
) -> Note {
    let note = Note {
        id: id.into(),
        session_id: session_id.into(),
        text: text.into(),
        timestamp,
    };
    notes::add_note(conn, &note).unwrap();
    note
}

pub fn store_api_key(conn: &Connection, key: &str) {
    settings::set_api_key(conn, key).unwrap();
}

/// A summary in the five-section layout the optimizer returns.
pub const SAMPLE_SUMMARY: &str = "Behaviors Observed:\n- Sat calmly for circle time\n\n\
Interventions Used:\n- Token economy\n\n\
Progress Made:\n- Mastered 3/5 targets\n\n\
Challenges:\n\n\
Recommendations:\n- Continue current program";
