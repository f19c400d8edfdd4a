use anyhow::Result;
use rusqlite::Connection;

use super::format_date;
use crate::store::sessions;

/// One row of the session list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionListEntry {
    pub id: String,
    pub heading: String,
    pub date_label: String,
}

/// Recent sessions, newest first.
#[derive(Debug, Default)]
pub struct SessionList {
    entries: Vec<SessionListEntry>,
}

impl SessionList {
    pub fn load(conn: &Connection) -> Result<Self> {
        let entries = sessions::get_sessions(conn)?
            .into_iter()
            .map(|s| SessionListEntry {
                heading: s.heading().to_string(),
                date_label: format_date(&s.date),
                id: s.id,
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SessionListEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::store::types::Session;

    fn add(conn: &Connection, id: &str, title: Option<&str>, created_at: i64) {
        sessions::add_session(
            conn,
            &Session {
                id: id.into(),
                date: "2024-02-09".into(),
                patient_name: format!("patient-{id}"),
                title: title.map(String::from),
                created_at,
            },
        )
        .unwrap();
    }

    #[test]
    fn lists_newest_first_with_headings() {
        let conn = db::open_memory_database().unwrap();
        add(&conn, "old", None, 100);
        add(&conn, "new", Some("Parent training"), 200);

        let list = SessionList::load(&conn).unwrap();
        let entries = list.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "new");
        assert_eq!(entries[0].heading, "Parent training");
        assert_eq!(entries[1].heading, "patient-old");
        assert_eq!(entries[1].date_label, "2/9/2024");
    }

    #[test]
    fn empty_database_gives_empty_list() {
        let conn = db::open_memory_database().unwrap();
        assert!(SessionList::load(&conn).unwrap().is_empty());
    }
}
