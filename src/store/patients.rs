use anyhow::{bail, Result};
use rusqlite::{params, Connection, Row};

use super::types::Patient;

/// Store a patient under a fresh id. Names need not be unique.
pub fn add_patient(conn: &Connection, name: &str) -> Result<Patient> {
    let name = name.trim();
    if name.is_empty() {
        bail!("patient name must not be empty");
    }

    let patient = Patient {
        id: super::new_id(),
        name: name.to_string(),
        created_at: super::now_millis(),
    };
    insert_patient(conn, &patient)?;
    tracing::info!(patient_id = %patient.id, "patient added");
    Ok(patient)
}

/// Insert a complete patient record. Fails on a duplicate id.
pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<()> {
    conn.execute(
        "INSERT INTO patients (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![patient.id, patient.name, patient.created_at],
    )?;
    Ok(())
}

/// All patients ordered by name.
pub fn get_patients(conn: &Connection) -> Result<Vec<Patient>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at FROM patients ORDER BY name, created_at")?;
    let patients = stmt
        .query_map([], row_to_patient)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(patients)
}

/// Patients whose name matches exactly (served by the name index).
pub fn find_patients_by_name(conn: &Connection, name: &str) -> Result<Vec<Patient>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, created_at FROM patients WHERE name = ?1 ORDER BY created_at",
    )?;
    let patients = stmt
        .query_map(params![name.trim()], row_to_patient)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(patients)
}

fn row_to_patient(row: &Row) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
