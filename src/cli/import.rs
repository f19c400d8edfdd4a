use anyhow::{Context, Result};
use std::path::Path;

use scribe::config::ScribeConfig;
use scribe::store::archive::{self, Archive};

use super::open_db;

/// Import records from a JSON file produced by `scribe export`.
///
/// Records whose id already exists are skipped. An imported summary replaces
/// the stored one for the same session.
pub fn import(config: &ScribeConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;

    let data: Archive = serde_json::from_str(&json).context("failed to parse import JSON")?;

    let mut conn = open_db(config)?;

    println!(
        "Importing {} sessions, {} notes, {} optimized notes and {} patients...",
        data.sessions.len(),
        data.notes.len(),
        data.optimized_notes.len(),
        data.patients.len()
    );

    let summary = archive::import_archive(&mut conn, &data)?;

    println!("Import complete:");
    println!("  Sessions imported:        {}", summary.sessions_imported);
    println!("  Notes imported:           {}", summary.notes_imported);
    println!("  Optimized notes imported: {}", summary.optimized_imported);
    println!("  Patients imported:        {}", summary.patients_imported);
    if summary.skipped > 0 {
        println!("  Skipped:                  {} (already exist)", summary.skipped);
    }

    Ok(())
}
