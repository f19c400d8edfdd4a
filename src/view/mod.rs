//! Per-page state containers.
//!
//! Each page owns its display state and calls into [`crate::store`] for
//! persistence. Failures inside a page are logged and turned into a short
//! message rather than propagated.

pub mod new_session;
pub mod optimized;
pub mod session_list;
pub mod session_page;
pub mod settings;

pub use new_session::NewSessionForm;
pub use optimized::{OptimizedPanel, PanelState};
pub use session_list::{SessionList, SessionListEntry};
pub use session_page::{Focus, PageAction, SessionPage};
pub use settings::{ApiKeyPrompt, FormMessage, SettingsForm};

use chrono::{Local, NaiveDate, TimeZone};

/// Keyboard input understood by the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Up,
    Down,
    Backspace,
    Delete,
    Escape,
    /// Ctrl+Enter / Cmd+Enter.
    CtrlEnter,
}

/// `YYYY-MM-DD` rendered as `M/D/YYYY`. Unparseable input is returned as-is.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%-m/%-d/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Epoch milliseconds rendered as local `h:mm AM`.
pub fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(t) => t.format("%-I:%M %p").to_string(),
        None => String::new(),
    }
}

/// Today's date in the local timezone, `YYYY-MM-DD`.
pub fn local_iso_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
