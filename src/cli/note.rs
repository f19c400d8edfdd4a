//! CLI `note` commands for scripted note entry outside `scribe open`.

use anyhow::{bail, Result};

use scribe::config::ScribeConfig;
use scribe::store::types::Note;
use scribe::store::{notes, sessions};
use scribe::view::format_time;

use super::open_db;

/// Add one note to a session.
pub fn add(config: &ScribeConfig, session_id: &str, text: &str) -> Result<()> {
    let conn = open_db(config)?;
    if sessions::get_session(&conn, session_id)?.is_none() {
        bail!("session not found: {session_id}");
    }

    let note = match notes::record_note(&conn, session_id, text) {
        Ok(note) => note,
        Err(e) => {
            tracing::error!(error = %e, session_id = %session_id, "failed to add note");
            bail!("Failed to add note");
        }
    };
    println!("[{}] added note {}", format_time(note.timestamp), note.id);
    Ok(())
}

/// Replace the text of a note, keeping its id and timestamp.
pub fn edit(config: &ScribeConfig, session_id: &str, note_id: &str, text: &str) -> Result<()> {
    let conn = open_db(config)?;
    let text = text.trim();
    if text.is_empty() {
        bail!("note text must not be empty");
    }

    let Some(existing) = notes::get_notes(&conn, session_id)?
        .into_iter()
        .find(|n| n.id == note_id)
    else {
        bail!("note {note_id} not found in session {session_id}");
    };

    let updated = Note {
        text: text.to_string(),
        ..existing
    };
    if let Err(e) = notes::update_note(&conn, &updated) {
        tracing::error!(error = %e, note_id = %note_id, "failed to update note");
        bail!("Failed to update note");
    }
    println!("Updated note {note_id}");
    Ok(())
}

pub fn delete(config: &ScribeConfig, note_id: &str) -> Result<()> {
    let conn = open_db(config)?;
    match notes::delete_note(&conn, note_id) {
        Ok(true) => println!("Deleted note {note_id}"),
        Ok(false) => bail!("note not found: {note_id}"),
        Err(e) => {
            tracing::error!(error = %e, note_id = %note_id, "failed to delete note");
            bail!("Failed to delete note");
        }
    }
    Ok(())
}
