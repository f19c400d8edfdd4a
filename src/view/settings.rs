//! Settings form and first-run API key prompt.

use rusqlite::Connection;

use crate::store::settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

/// Settings popover: view and replace the stored API key.
#[derive(Debug, Default)]
pub struct SettingsForm {
    pub api_key: String,
    message: Option<FormMessage>,
}

impl SettingsForm {
    /// Load the stored key into the form.
    pub fn load(conn: &Connection) -> Self {
        match settings::api_key(conn) {
            Ok(key) => Self {
                api_key: key.unwrap_or_default(),
                message: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to load API key");
                Self {
                    api_key: String::new(),
                    message: Some(FormMessage::Error("Failed to load saved API key".into())),
                }
            }
        }
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Save the key as entered.
    pub fn save(&mut self, conn: &Connection) -> bool {
        match settings::set_api_key(conn, &self.api_key) {
            Ok(_) => {
                self.message = Some(FormMessage::Success("API key saved successfully".into()));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save API key");
                self.message = Some(FormMessage::Error("Failed to save API key".into()));
                false
            }
        }
    }
}

/// First-run prompt shown while no API key is stored.
#[derive(Debug, Default)]
pub struct ApiKeyPrompt {
    pub api_key: String,
    error: Option<String>,
}

impl ApiKeyPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the prompt is needed: no usable key stored.
    pub fn is_needed(conn: &Connection) -> bool {
        match settings::api_key(conn) {
            Ok(key) => key.is_none(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load API key");
                true
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and save the trimmed key. Keys must start with `sk-`.
    pub fn save(&mut self, conn: &Connection) -> bool {
        let key = self.api_key.trim();
        if !key.starts_with("sk-") {
            self.error = Some("Invalid API key format. It should start with 'sk-'".into());
            return false;
        }
        match settings::set_api_key(conn, key) {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save API key");
                self.error = Some("Failed to save API key".into());
                false
            }
        }
    }
}
