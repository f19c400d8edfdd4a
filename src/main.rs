mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scribe::config::ScribeConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scribe", version, about = "Therapy session notes with AI-powered summaries")]
struct Cli {
    /// Config file (defaults to ~/.scribe/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create, list, show, or delete sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Add, edit, or delete individual notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Open a session for interactive note taking
    Open {
        /// Session id
        id: String,
    },
    /// Summarize a session's notes via the optimizer
    Optimize {
        /// Session id
        id: String,
        /// Re-run even if a summary is already stored
        #[arg(long)]
        force: bool,
    },
    /// View or change the stored API key
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// First-run setup: enter your OpenAI API key
    Setup,
    /// Manage patients
    Patient {
        #[command(subcommand)]
        action: PatientAction,
    },
    /// Check connectivity to the optimizer
    Status {
        /// Keep polling and print every status change
        #[arg(long)]
        watch: bool,
    },
    /// Run the optimize backend
    Serve,
    /// Run database diagnostics
    Doctor,
    /// Export sessions, notes, and summaries as JSON to stdout
    Export,
    /// Import a JSON export
    Import {
        /// Path to the export file
        file: PathBuf,
    },
    /// Delete all stored data (asks for confirmation)
    Reset,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Create a new session
    New {
        /// Patient name
        #[arg(long)]
        patient: String,
        /// Session date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Optional title
        #[arg(long)]
        title: Option<String>,
    },
    /// List recent sessions
    List,
    /// Show a session with its notes and summary
    Show { id: String },
    /// Delete a session (its notes are kept)
    Delete { id: String },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Add a note to a session
    Add { session: String, text: String },
    /// Replace a note's text
    Edit { session: String, note: String, text: String },
    /// Delete a note
    Delete { note: String },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show whether a key is stored (masked)
    Show,
    /// Store an API key
    SetKey { key: String },
}

#[derive(Subcommand)]
enum PatientAction {
    /// Add a patient
    Add { name: String },
    /// List patients, optionally filtered by exact name
    List {
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = match &cli.config {
        Some(path) => ScribeConfig::load_from(path)?,
        None => ScribeConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output and exports.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Session { action } => match action {
            SessionAction::New {
                patient,
                date,
                title,
            } => cli::session::new(&config, &patient, date.as_deref(), title.as_deref())?,
            SessionAction::List => cli::session::list(&config)?,
            SessionAction::Show { id } => cli::session::show(&config, &id)?,
            SessionAction::Delete { id } => cli::session::delete(&config, &id)?,
        },
        Command::Note { action } => match action {
            NoteAction::Add { session, text } => cli::note::add(&config, &session, &text)?,
            NoteAction::Edit {
                session,
                note,
                text,
            } => cli::note::edit(&config, &session, &note, &text)?,
            NoteAction::Delete { note } => cli::note::delete(&config, &note)?,
        },
        Command::Open { id } => cli::open::open(&config, &id).await?,
        Command::Optimize { id, force } => cli::optimize::optimize(&config, &id, force).await?,
        Command::Settings { action } => match action {
            SettingsAction::Show => cli::settings::show(&config)?,
            SettingsAction::SetKey { key } => cli::settings::set_key(&config, &key)?,
        },
        Command::Setup => cli::settings::setup(&config)?,
        Command::Patient { action } => match action {
            PatientAction::Add { name } => cli::patient::add(&config, &name)?,
            PatientAction::List { name } => cli::patient::list(&config, name.as_deref())?,
        },
        Command::Status { watch } => cli::status::status(&config, watch).await?,
        Command::Serve => scribe::server::serve(config).await?,
        Command::Doctor => cli::doctor::doctor(&config)?,
        Command::Export => cli::export::export(&config)?,
        Command::Import { file } => cli::import::import(&config, &file)?,
        Command::Reset => cli::reset::reset(&config)?,
    }

    Ok(())
}
