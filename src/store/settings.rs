use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{Settings, SETTINGS_ID};

/// Write the settings record, replacing whatever was stored under its id.
pub fn save_settings(conn: &Connection, settings: &Settings) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (id, openai_api_key, updated_at) VALUES (?1, ?2, ?3)",
        params![settings.id, settings.openai_api_key, settings.updated_at],
    )?;
    tracing::info!(has_key = settings.openai_api_key.is_some(), "settings saved");
    Ok(())
}

/// The singleton settings record, if it has ever been saved.
pub fn get_settings(conn: &Connection) -> Result<Option<Settings>> {
    let settings = conn
        .query_row(
            "SELECT id, openai_api_key, updated_at FROM settings WHERE id = ?1",
            params![SETTINGS_ID],
            |row| {
                Ok(Settings {
                    id: row.get(0)?,
                    openai_api_key: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(settings)
}

/// Store `key` as the API credential. The key is saved as given.
pub fn set_api_key(conn: &Connection, key: &str) -> Result<Settings> {
    let settings = Settings {
        id: SETTINGS_ID.to_string(),
        openai_api_key: Some(key.to_string()),
        updated_at: super::now_millis(),
    };
    save_settings(conn, &settings)?;
    Ok(settings)
}

/// The stored API credential. An empty string counts as no key.
pub fn api_key(conn: &Connection) -> Result<Option<String>> {
    Ok(get_settings(conn)?
        .and_then(|s| s.openai_api_key)
        .filter(|k| !k.is_empty()))
}
