//! Whole-database export and import.
//!
//! The archive holds sessions, patients, notes and optimized notes. Settings
//! are left out because they carry the API credential.

use anyhow::Result;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::types::{Note, OptimizedNote, Patient, Session};
use super::{notes, optimized, patients, sessions};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    pub notes: Vec<Note>,
    #[serde(default)]
    pub optimized_notes: Vec<OptimizedNote>,
}

/// Per-collection counts from [`import_archive`].
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub sessions_imported: u64,
    pub patients_imported: u64,
    pub notes_imported: u64,
    pub optimized_imported: u64,
    /// Records whose id was already present.
    pub skipped: u64,
}

/// Read every exportable record.
pub fn export_archive(conn: &Connection) -> Result<Archive> {
    let mut sessions = sessions::get_sessions(conn)?;
    // oldest first reads naturally in a file
    sessions.reverse();

    Ok(Archive {
        sessions,
        patients: patients::get_patients(conn)?,
        notes: notes::get_all_notes(conn)?,
        optimized_notes: optimized::get_all_optimized_notes(conn)?,
    })
}

/// Insert archive records, skipping any whose id already exists.
///
/// Optimized notes go through the per-session upsert, so an imported summary
/// replaces the content of an existing one for the same session.
pub fn import_archive(conn: &mut Connection, archive: &Archive) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for session in &archive.sessions {
        if exists(conn, "sessions", &session.id)? {
            summary.skipped += 1;
            continue;
        }
        sessions::add_session(conn, session)?;
        summary.sessions_imported += 1;
    }

    for patient in &archive.patients {
        if exists(conn, "patients", &patient.id)? {
            summary.skipped += 1;
            continue;
        }
        patients::insert_patient(conn, patient)?;
        summary.patients_imported += 1;
    }

    for note in &archive.notes {
        if exists(conn, "notes", &note.id)? {
            summary.skipped += 1;
            continue;
        }
        notes::add_note(conn, note)?;
        summary.notes_imported += 1;
    }

    for note in &archive.optimized_notes {
        if exists(conn, "optimized_notes", &note.id)? {
            summary.skipped += 1;
            continue;
        }
        optimized::save_optimized_note(conn, note)?;
        summary.optimized_imported += 1;
    }

    tracing::info!(?summary, "archive imported");
    Ok(summary)
}

fn exists(conn: &Connection, table: &str, id: &str) -> Result<bool> {
    let found: bool = conn.query_row(
        &format!("SELECT COUNT(*) > 0 FROM {table} WHERE id = ?1"),
        params![id],
        |row| row.get(0),
    )?;
    Ok(found)
}
