use rusqlite::Connection;

use crate::optimize::sections::{parse_sections, Section};
use crate::optimize::{service, OptimizerClient};
use crate::store::optimized;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Ready(String),
    /// Generic message for display; details went to the log.
    Failed(String),
}

/// The optimized-notes panel shown above a session's notes.
#[derive(Debug)]
pub struct OptimizedPanel {
    session_id: String,
    state: PanelState,
}

impl OptimizedPanel {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PanelState::Loading
    }

    /// Show the stored summary, if any. Returns whether one was found.
    pub fn load_cached(&mut self, conn: &Connection) -> bool {
        match optimized::get_optimized_note(conn, &self.session_id) {
            Ok(Some(note)) => {
                self.state = PanelState::Ready(note.content);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    session_id = %self.session_id,
                    "failed to load optimized note"
                );
                false
            }
        }
    }

    /// Run a fresh optimization. Ignored while one is already in flight.
    pub async fn optimize(&mut self, conn: &mut Connection, client: &OptimizerClient) {
        if self.is_loading() {
            return;
        }
        self.state = PanelState::Loading;

        self.state = match service::optimize_session(conn, client, &self.session_id).await {
            Ok(note) => PanelState::Ready(note.content),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    session_id = %self.session_id,
                    "failed to optimize notes"
                );
                PanelState::Failed(e.user_message().to_string())
            }
        };
    }

    /// Show the stored summary, optimizing first when there is none and the
    /// session has notes.
    pub async fn open(&mut self, conn: &mut Connection, client: &OptimizerClient, has_notes: bool) {
        if !has_notes {
            return;
        }
        if !self.load_cached(conn) {
            self.optimize(conn, client).await;
        }
    }

    /// Parsed sections of the current summary (empty unless ready).
    pub fn sections(&self) -> Vec<Section> {
        match &self.state {
            PanelState::Ready(text) => parse_sections(text),
            _ => Vec::new(),
        }
    }
}
