//! Record type definitions.
//!
//! Defines [`Session`], [`Note`], [`OptimizedNote`], [`Settings`] and
//! [`Patient`]. Field names serialize in camelCase so exported archives keep
//! the shape of the browser records they replace. All timestamps are Unix
//! epoch milliseconds.

use serde::{Deserialize, Serialize};

/// Id of the one and only settings record.
pub const SETTINGS_ID: &str = "default";

/// A recorded therapy encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// UUID v7 primary key.
    pub id: String,
    /// Calendar date of the encounter, `YYYY-MM-DD`.
    pub date: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub created_at: i64,
}

impl Session {
    /// Heading shown for the session: the title when set, else the patient name.
    pub fn heading(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.patient_name)
    }
}

/// Input for creating a session.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub date: String,
    pub patient_name: String,
    pub title: Option<String>,
}

/// A timestamped free-text entry attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    /// Owning session. Not enforced by the store.
    pub session_id: String,
    pub text: String,
    pub timestamp: i64,
}

/// The summarized form of a session's notes. At most one per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedNote {
    pub id: String,
    pub session_id: String,
    pub content: String,
    pub timestamp: i64,
}

/// Singleton settings record holding the user's API credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: String,
    #[serde(rename = "openai_api_key", default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(title: Option<&str>) -> Session {
        Session {
            id: "s1".into(),
            date: "2024-03-01".into(),
            patient_name: "Jordan".into(),
            title: title.map(String::from),
            created_at: 0,
        }
    }

    #[test]
    fn heading_prefers_title() {
        assert_eq!(session(Some("Intake")).heading(), "Intake");
        assert_eq!(session(None).heading(), "Jordan");
        assert_eq!(session(Some("")).heading(), "Jordan");
    }

    #[test]
    fn records_serialize_in_camel_case() {
        let json = serde_json::to_value(session(None)).unwrap();
        assert_eq!(json["patientName"], "Jordan");
        assert_eq!(json["createdAt"], 0);
        assert!(json.get("title").is_none());

        let settings = Settings {
            id: SETTINGS_ID.into(),
            openai_api_key: Some("sk-test".into()),
            updated_at: 5,
        };
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["openai_api_key"], "sk-test");
        assert_eq!(json["updatedAt"], 5);
    }
}
