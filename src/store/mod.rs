//! Storage accessors for sessions, notes, optimized notes, settings and patients.
//!
//! Each submodule is a thin read/write wrapper over one collection. There is no
//! cross-collection transaction and no cascading delete.

pub mod archive;
pub mod notes;
pub mod optimized;
pub mod patients;
pub mod sessions;
pub mod settings;
pub mod types;

/// Current time as Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fresh time-sortable record id.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
