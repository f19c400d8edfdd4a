//! Note optimization through the remote summarization service.
//!
//! - [`client`]: HTTP calls to `POST /optimize` and the root health probe
//! - [`health`]: periodic connectivity polling
//! - [`sections`]: splitting a summary into titled bullet lists
//! - [`service`]: read key and notes, call the service, store the result

pub mod client;
pub mod health;
pub mod sections;
pub mod service;

pub use client::OptimizerClient;
pub use health::{HealthMonitor, ServerStatus};

/// Everything that can go wrong while optimizing a session's notes.
///
/// Callers log the error and show [`OptimizeError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("no OpenAI API key is stored")]
    MissingApiKey,

    #[error("session {0} has no notes to optimize")]
    NoNotes(String),

    #[error("request to optimizer failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("optimizer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("optimizer response was not understood: {0}")]
    InvalidResponse(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl OptimizeError {
    /// Generic message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "OpenAI API key not found",
            _ => "Failed to optimize notes",
        }
    }
}
