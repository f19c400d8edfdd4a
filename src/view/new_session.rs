use anyhow::Result;
use rusqlite::Connection;

use super::local_iso_date;
use crate::store::sessions;
use crate::store::types::{NewSession, Session};

/// The "Create new session" form.
#[derive(Debug, Clone)]
pub struct NewSessionForm {
    pub date: String,
    pub patient_name: String,
    pub title: String,
    submitting: bool,
}

impl Default for NewSessionForm {
    fn default() -> Self {
        Self {
            date: local_iso_date(),
            patient_name: String::new(),
            title: String::new(),
            submitting: false,
        }
    }
}

impl NewSessionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submission needs a patient name and no submission already running.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.patient_name.trim().is_empty()
    }

    /// Create the session. On success the patient name and title are cleared
    /// and the date is kept for the next entry.
    pub fn submit(&mut self, conn: &Connection) -> Result<Session> {
        anyhow::ensure!(self.can_submit(), "patient name is required");

        self.submitting = true;
        let result = sessions::create_session(
            conn,
            &NewSession {
                date: self.date.clone(),
                patient_name: self.patient_name.clone(),
                title: Some(self.title.clone()),
            },
        );
        self.submitting = false;

        match result {
            Ok(session) => {
                self.patient_name.clear();
                self.title.clear();
                Ok(session)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create session");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn defaults_to_today() {
        let form = NewSessionForm::new();
        assert_eq!(form.date, local_iso_date());
        assert!(!form.can_submit());
    }

    #[test]
    fn submit_creates_session_and_resets_fields() {
        let conn = db::open_memory_database().unwrap();
        let mut form = NewSessionForm::new();
        form.date = "2024-04-15".into();
        form.patient_name = "Morgan".into();
        form.title = "Follow-up".into();
        assert!(form.can_submit());

        let session = form.submit(&conn).unwrap();
        assert_eq!(session.patient_name, "Morgan");
        assert_eq!(session.title.as_deref(), Some("Follow-up"));
        assert_eq!(session.date, "2024-04-15");

        assert!(form.patient_name.is_empty());
        assert!(form.title.is_empty());
        assert_eq!(form.date, "2024-04-15");
        assert!(sessions::get_session(&conn, &session.id).unwrap().is_some());
    }

    #[test]
    fn submit_without_patient_fails() {
        let conn = db::open_memory_database().unwrap();
        let mut form = NewSessionForm::new();
        form.patient_name = "   ".into();
        assert!(form.submit(&conn).is_err());
        assert!(sessions::get_sessions(&conn).unwrap().is_empty());
    }
}
