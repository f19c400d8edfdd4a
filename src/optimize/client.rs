use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::health::ServerStatus;
use super::OptimizeError;
use crate::config::OptimizerConfig;

#[derive(Debug, Serialize)]
struct NotesRequest<'a> {
    notes: &'a str,
}

#[derive(Debug, Deserialize)]
struct OptimizeResponse {
    optimized: String,
}

/// Client for the optimization service (`POST /optimize`, `GET /`).
#[derive(Debug, Clone)]
pub struct OptimizerClient {
    client: Client,
    base_url: String,
}

impl OptimizerClient {
    pub fn new(config: &OptimizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against an explicit base URL with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = OptimizerConfig {
            base_url: base_url.into(),
            ..OptimizerConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send newline-joined note text for summarization and return the summary.
    pub async fn optimize(&self, api_key: &str, notes: &str) -> Result<String, OptimizeError> {
        let url = format!("{}/optimize", self.base_url);
        tracing::debug!(url = %url, notes_len = notes.len(), "requesting optimization");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&NotesRequest { notes })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OptimizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OptimizeResponse = response
            .json()
            .await
            .map_err(|e| OptimizeError::InvalidResponse(e.to_string()))?;

        tracing::info!(summary_len = parsed.optimized.len(), "optimization complete");
        Ok(parsed.optimized)
    }

    /// Probe the service root. Any transport error counts as disconnected.
    pub async fn check_health(&self) -> ServerStatus {
        let url = format!("{}/", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => ServerStatus::Connected,
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), "health check returned non-success");
                ServerStatus::Disconnected
            }
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                ServerStatus::Disconnected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn optimize_sends_bearer_and_notes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/optimize"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(serde_json::json!({"notes": "a\nb"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"optimized": "Summary:\n- ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = OptimizerClient::with_base_url(server.uri()).unwrap();
        let out = client.optimize("sk-test", "a\nb").await.unwrap();
        assert_eq!(out, "Summary:\n- ok");
    }

    #[tokio::test]
    async fn optimize_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = OptimizerClient::with_base_url(server.uri()).unwrap();
        let err = client.optimize("bad", "x").await.unwrap_err();
        assert!(matches!(err, OptimizeError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn optimize_rejects_body_without_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"x": 1})))
            .mount(&server)
            .await;

        let client = OptimizerClient::with_base_url(server.uri()).unwrap();
        let err = client.optimize("sk", "x").await.unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn health_reflects_root_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
            )
            .mount(&server)
            .await;

        let client = OptimizerClient::with_base_url(format!("{}/", server.uri())).unwrap();
        assert_eq!(client.check_health().await, ServerStatus::Connected);

        let down = OptimizerClient::with_base_url("http://127.0.0.1:1").unwrap();
        assert_eq!(down.check_health().await, ServerStatus::Disconnected);
    }
}
