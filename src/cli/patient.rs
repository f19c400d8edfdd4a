//! CLI `patient` commands.

use anyhow::Result;

use scribe::config::ScribeConfig;
use scribe::store::patients;
use scribe::view::format_time;

use super::open_db;

pub fn add(config: &ScribeConfig, name: &str) -> Result<()> {
    let conn = open_db(config)?;
    let patient = patients::add_patient(&conn, name)?;
    println!("Added patient {} ({})", patient.name, patient.id);
    Ok(())
}

/// List all patients, or only those with exactly `name`.
pub fn list(config: &ScribeConfig, name: Option<&str>) -> Result<()> {
    let conn = open_db(config)?;
    let found = match name {
        Some(name) => patients::find_patients_by_name(&conn, name)?,
        None => patients::get_patients(&conn)?,
    };

    if found.is_empty() {
        println!("No patients found.");
        return Ok(());
    }
    for patient in &found {
        println!(
            "{:<38} {:<24} added {}",
            patient.id,
            patient.name,
            format_time(patient.created_at)
        );
    }
    Ok(())
}
