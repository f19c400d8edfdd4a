//! CLI `optimize` command.

use anyhow::{bail, Result};

use scribe::config::ScribeConfig;
use scribe::optimize::{service, OptimizerClient};
use scribe::store::sessions;
use scribe::view::format_time;

use super::{open_db, print_summary};

/// Print the session's summary, generating it when none is stored or when
/// `force` is set.
pub async fn optimize(config: &ScribeConfig, session_id: &str, force: bool) -> Result<()> {
    let mut conn = open_db(config)?;
    if sessions::get_session(&conn, session_id)?.is_none() {
        bail!("session not found: {session_id}");
    }

    let client = OptimizerClient::new(&config.optimizer)?;
    let result = if force {
        service::optimize_session(&mut conn, &client, session_id).await
    } else {
        service::load_or_optimize(&mut conn, &client, session_id).await
    };

    match result {
        Ok(note) => {
            println!("Optimized Notes ({})", format_time(note.timestamp));
            print_summary(&note.content);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, session_id = %session_id, "failed to optimize notes");
            bail!("{}", e.user_message())
        }
    }
}
