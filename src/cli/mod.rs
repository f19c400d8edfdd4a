pub mod doctor;
pub mod export;
pub mod import;
pub mod note;
pub mod open;
pub mod optimize;
pub mod patient;
pub mod reset;
pub mod session;
pub mod settings;
pub mod status;

use anyhow::{Context, Result};
use rusqlite::Connection;

use scribe::config::ScribeConfig;
use scribe::optimize::sections::{parse_sections, render_sections};

/// Open the configured database, creating and migrating it as needed.
pub(crate) fn open_db(config: &ScribeConfig) -> Result<Connection> {
    let db_path = config.resolved_db_path();
    scribe::db::open_database(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Print a stored summary as titled bullet sections.
pub(crate) fn print_summary(content: &str) {
    print!("{}", render_sections(&parse_sections(content)));
}

/// Show a key with all but the last four characters hidden.
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}
