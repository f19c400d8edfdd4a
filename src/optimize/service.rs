use rusqlite::Connection;

use super::{OptimizeError, OptimizerClient};
use crate::store::types::OptimizedNote;
use crate::store::{self, notes, optimized, settings};

/// Summarize a session's notes and store the result as its optimized note.
///
/// Reads the API key from settings and all notes of the session, sends the
/// newline-joined text to the service, then upserts the summary.
pub async fn optimize_session(
    conn: &mut Connection,
    client: &OptimizerClient,
    session_id: &str,
) -> Result<OptimizedNote, OptimizeError> {
    let api_key = settings::api_key(conn)?.ok_or(OptimizeError::MissingApiKey)?;

    let session_notes = notes::get_notes(conn, session_id)?;
    if session_notes.is_empty() {
        return Err(OptimizeError::NoNotes(session_id.to_string()));
    }
    let text = notes::join_note_texts(&session_notes);

    tracing::info!(
        session_id = %session_id,
        notes = session_notes.len(),
        "optimizing session notes"
    );
    let content = client.optimize(&api_key, &text).await?;

    let note = OptimizedNote {
        id: store::new_id(),
        session_id: session_id.to_string(),
        content,
        timestamp: store::now_millis(),
    };
    let stored = optimized::save_optimized_note(conn, &note)?;
    Ok(stored)
}

/// Return the stored optimized note for the session, optimizing only when
/// none exists yet.
pub async fn load_or_optimize(
    conn: &mut Connection,
    client: &OptimizerClient,
    session_id: &str,
) -> Result<OptimizedNote, OptimizeError> {
    if let Some(existing) = optimized::get_optimized_note(conn, session_id)? {
        tracing::debug!(session_id = %session_id, "using stored optimized note");
        return Ok(existing);
    }
    optimize_session(conn, client, session_id).await
}
