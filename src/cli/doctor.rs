//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use scribe::config::ScribeConfig;
use scribe::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &ScribeConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `scribe setup` or `scribe session new` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path)
        .map(|m| m.len())
        .unwrap_or(0);

    let conn = db::open_database(&db_path)
        .context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn)
        .context("failed to run health check")?;

    println!("Scribe Health Report");
    println!("====================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("API key:           {}", if report.has_api_key { "stored" } else { "(not set)" });
    println!("Optimizer URL:     {}", config.optimizer.base_url);
    println!();
    println!("Row counts:");
    println!("  Sessions:        {}", report.session_count);
    println!("  Notes:           {}", report.note_count);
    println!("  Optimized notes: {}", report.optimized_note_count);
    println!("  Patients:        {}", report.patient_count);
    if report.orphan_note_count > 0 {
        println!(
            "  WARNING: {} notes belong to deleted sessions.",
            report.orphan_note_count
        );
    }
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    if !report.integrity_ok {
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db ~/.scribe/sessions.db");
        println!("  2. Or export from a good copy and reimport:");
        println!("     scribe export > backup.json");
        println!("     scribe reset && scribe import backup.json");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
