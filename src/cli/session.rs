//! CLI `session` commands: create, list, show, delete.

use anyhow::{bail, Result};

use scribe::config::ScribeConfig;
use scribe::store::optimized;
use scribe::view::{format_date, format_time, NewSessionForm, SessionList, SessionPage};

use super::{open_db, print_summary};

/// Create a session through the new-session form and print its id.
pub fn new(
    config: &ScribeConfig,
    patient: &str,
    date: Option<&str>,
    title: Option<&str>,
) -> Result<()> {
    let conn = open_db(config)?;

    let mut form = NewSessionForm::new();
    form.patient_name = patient.to_string();
    if let Some(date) = date {
        form.date = date.to_string();
    }
    form.title = title.unwrap_or_default().to_string();

    if !form.can_submit() {
        bail!("patient name is required");
    }
    let session = match form.submit(&conn) {
        Ok(session) => session,
        Err(_) => bail!("Failed to create session"),
    };

    println!("Created session {}", session.id);
    println!("  {} ({})", session.heading(), format_date(&session.date));
    Ok(())
}

/// List sessions, newest first.
pub fn list(config: &ScribeConfig) -> Result<()> {
    let conn = open_db(config)?;
    let list = SessionList::load(&conn)?;

    if list.is_empty() {
        println!("No sessions yet. Create one with `scribe session new --patient <name>`.");
        return Ok(());
    }

    println!("{:<38} {:<12} HEADING", "ID", "DATE");
    for entry in list.entries() {
        println!("{:<38} {:<12} {}", entry.id, entry.date_label, entry.heading);
    }
    Ok(())
}

/// Print a session with its notes and stored summary.
pub fn show(config: &ScribeConfig, id: &str) -> Result<()> {
    let conn = open_db(config)?;
    let Some(page) = SessionPage::load(&conn, id)? else {
        bail!("session not found: {id}");
    };

    let session = page.session();
    println!("{}", page.heading());
    println!("Date:    {}", format_date(&session.date));
    println!("Patient: {}", session.patient_name);
    println!();

    if page.notes().is_empty() {
        println!("No notes.");
    } else {
        println!("Notes:");
        for note in page.notes() {
            println!("  [{}] {}  ({})", format_time(note.timestamp), note.text, note.id);
        }
    }

    if let Some(summary) = optimized::get_optimized_note(&conn, id)? {
        println!();
        println!("Optimized Notes ({})", format_time(summary.timestamp));
        print_summary(&summary.content);
    }
    Ok(())
}

/// Delete a session row. Its notes and summary stay in the database.
pub fn delete(config: &ScribeConfig, id: &str) -> Result<()> {
    let conn = open_db(config)?;
    if scribe::store::sessions::delete_session(&conn, id)? {
        println!("Deleted session {id}");
    } else {
        bail!("session not found: {id}");
    }
    Ok(())
}
