//! CLI `reset` command: delete all stored data after user confirmation.

use anyhow::{bail, Result};
use rusqlite::Connection;
use std::io::Write;

use scribe::config::ScribeConfig;

use super::open_db;

/// Delete all sessions, notes, summaries, patients and the stored API key
/// after user confirmation.
pub fn reset(config: &ScribeConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!(
        "WARNING: This will permanently delete ALL sessions, notes, summaries, patients, \
         and the stored API key."
    );
    println!("Database: {}", db_path.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let mut conn = open_db(config)?;
    clear_all(&mut conn)?;
    tracing::info!(path = %db_path.display(), "database reset");

    println!("All data deleted. Database reset complete.");
    Ok(())
}

/// Empty every collection in one transaction.
fn clear_all(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM optimized_notes;
         DELETE FROM notes;
         DELETE FROM sessions;
         DELETE FROM patients;
         DELETE FROM settings;",
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe::db;
    use scribe::store::types::NewSession;
    use scribe::store::{notes, patients, sessions, settings};

    #[test]
    fn clear_all_empties_every_collection() {
        let mut conn = db::open_memory_database().unwrap();
        let session = sessions::create_session(
            &conn,
            &NewSession {
                date: "2024-06-01".into(),
                patient_name: "Quinn".into(),
                title: None,
            },
        )
        .unwrap();
        notes::record_note(&conn, &session.id, "note").unwrap();
        patients::add_patient(&conn, "Quinn").unwrap();
        settings::set_api_key(&conn, "sk-test").unwrap();

        clear_all(&mut conn).unwrap();

        let report = db::check_database_health(&conn).unwrap();
        assert_eq!(report.session_count, 0);
        assert_eq!(report.note_count, 0);
        assert_eq!(report.patient_count, 0);
        assert!(!report.has_api_key);
    }
}
