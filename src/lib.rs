//! Therapy session notes with AI-powered summaries.
//!
//! Scribe records timestamped notes against therapy sessions in a local SQLite
//! file and can summarize a session's notes through a remote "optimize"
//! service. The same crate ships that service as a small HTTP backend which
//! forwards the user's key to an OpenAI-compatible chat-completions API.
//!
//! | Record | Keyed by | Notes |
//! |--------|----------|-------|
//! | **Session** | id | date, patient name, optional title |
//! | **Note** | id | belongs to a session by `session_id` |
//! | **OptimizedNote** | id | one per session, overwritten on re-optimize |
//! | **Settings** | `"default"` | the API credential |
//! | **Patient** | id | looked up by name |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization, schema, migrations, and health checks
//! - [`store`]: Record types and per-collection read/write accessors
//! - [`optimize`]: Optimizer HTTP client, connectivity monitor, summary parsing
//! - [`view`]: Page state containers (session list, session page, forms)
//! - [`server`]: The optimize backend (axum)

pub mod config;
pub mod db;
pub mod optimize;
pub mod server;
pub mod store;
pub mod view;
