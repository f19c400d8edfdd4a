use anyhow::Result;

use scribe::config::ScribeConfig;
use scribe::store::archive;

use super::open_db;

/// Export sessions, patients, notes and summaries as JSON to stdout.
pub fn export(config: &ScribeConfig) -> Result<()> {
    let conn = open_db(config)?;
    let data = archive::export_archive(&conn)?;

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!(
        "Exported {} sessions, {} notes, {} optimized notes and {} patients.",
        data.sessions.len(),
        data.notes.len(),
        data.optimized_notes.len(),
        data.patients.len()
    );

    Ok(())
}
