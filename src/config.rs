use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct ScribeConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub optimizer: OptimizerConfig,
    pub openai: OpenAiConfig,
}

/// Settings for the local optimize backend (`scribe serve`) and logging.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

/// Where the client side sends `POST /optimize` and health probes.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OptimizerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub health_interval_secs: u64,
}

/// Upstream chat-completions endpoint used by the backend.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            log_level: "info".into(),
            allowed_origins: vec!["http://localhost:3000".into()],
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_scribe_dir()
            .join("sessions.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 60,
            health_interval_secs: 30,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Returns `~/.scribe/`, falling back to `./.scribe` when no home directory is known.
pub fn default_scribe_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".scribe")
}

/// Returns the default config file path: `~/.scribe/config.toml`
pub fn default_config_path() -> PathBuf {
    default_scribe_dir().join("config.toml")
}

impl ScribeConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ScribeConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (SCRIBE_DB, SCRIBE_LOG_LEVEL, SCRIBE_OPTIMIZER_URL, SCRIBE_OPENAI_BASE_URL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SCRIBE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("SCRIBE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("SCRIBE_OPTIMIZER_URL") {
            self.optimizer.base_url = val;
        }
        if let Ok(val) = std::env::var("SCRIBE_OPENAI_BASE_URL") {
            self.openai.base_url = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// `host:port` for the optimize backend listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScribeConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.optimizer.base_url, "http://localhost:8000");
        assert_eq!(config.optimizer.health_interval_secs, 30);
        assert_eq!(config.openai.model, "gpt-4");
        assert_eq!(config.openai.max_tokens, 1000);
        assert!(config.storage.db_path.ends_with("sessions.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"
port = 9000

[storage]
db_path = "/tmp/test.db"

[openai]
model = "gpt-4o-mini"
"#;
        let config: ScribeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.optimizer.timeout_secs, 60);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ScribeConfig::default();
        std::env::set_var("SCRIBE_DB", "/tmp/override.db");
        std::env::set_var("SCRIBE_LOG_LEVEL", "trace");
        std::env::set_var("SCRIBE_OPTIMIZER_URL", "http://10.0.0.2:8000");
        std::env::set_var("SCRIBE_OPENAI_BASE_URL", "http://localhost:11434/v1");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.server.log_level, "trace");
        assert_eq!(config.optimizer.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.openai.base_url, "http://localhost:11434/v1");

        // Clean up
        std::env::remove_var("SCRIBE_DB");
        std::env::remove_var("SCRIBE_LOG_LEVEL");
        std::env::remove_var("SCRIBE_OPTIMIZER_URL");
        std::env::remove_var("SCRIBE_OPENAI_BASE_URL");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ScribeConfig::load_from(tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = ScribeConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }
}
