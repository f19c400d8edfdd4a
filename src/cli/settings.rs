//! CLI `settings` and `setup` commands.

use std::io::Write;

use anyhow::{bail, Result};

use scribe::config::ScribeConfig;
use scribe::store::settings;
use scribe::view::{ApiKeyPrompt, FormMessage, SettingsForm};

use super::{mask_key, open_db};

/// Show whether a key is stored, masked.
pub fn show(config: &ScribeConfig) -> Result<()> {
    let conn = open_db(config)?;
    let form = SettingsForm::load(&conn);
    if let Some(FormMessage::Error(message)) = form.message() {
        bail!("{message}");
    }

    println!("Database:       {}", config.resolved_db_path().display());
    println!("Optimizer URL:  {}", config.optimizer.base_url);
    if form.api_key.is_empty() {
        println!("OpenAI API key: (not set)");
    } else {
        println!("OpenAI API key: {}", mask_key(&form.api_key));
    }
    if let Some(stored) = settings::get_settings(&conn)? {
        println!("Updated:        {}", scribe::view::format_time(stored.updated_at));
    }
    Ok(())
}

/// Store a key as given (the settings form does not check its format).
pub fn set_key(config: &ScribeConfig, key: &str) -> Result<()> {
    let conn = open_db(config)?;
    let mut form = SettingsForm::load(&conn);
    form.api_key = key.to_string();
    form.save(&conn);

    match form.message() {
        Some(FormMessage::Success(message)) => {
            println!("{message}");
            Ok(())
        }
        Some(FormMessage::Error(message)) => bail!("{message}"),
        None => Ok(()),
    }
}

/// First-run prompt: ask for an `sk-` key on stdin until one is accepted.
pub fn setup(config: &ScribeConfig) -> Result<()> {
    let conn = open_db(config)?;
    if !ApiKeyPrompt::is_needed(&conn) {
        println!("An API key is already stored. Use `scribe settings set-key` to replace it.");
        return Ok(());
    }

    println!("Welcome to Scribe! Please enter your OpenAI API key to continue.");
    let mut prompt = ApiKeyPrompt::new();
    loop {
        print!("API key: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            bail!("setup cancelled");
        }
        prompt.api_key = input;

        if prompt.save(&conn) {
            println!("API key saved. You're ready to go.");
            return Ok(());
        }
        if let Some(error) = prompt.error() {
            println!("{error}");
        }
    }
}
