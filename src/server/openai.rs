//! Chat-completions call that turns raw session notes into a sectioned summary.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde_json::json;

use crate::config::OpenAiConfig;

const SYSTEM_PROMPT: &str = "You are an expert ABA therapy note optimizer. \
Analyze the session notes and provide a response in the following exact format:

Behaviors Observed:
- {specific behavior}
- {specific behavior}

Interventions Used:
- {specific intervention}
- {specific intervention}

Progress Made:
- {specific progress point}
- {specific progress point}

Challenges:
- {specific challenge}
- {specific challenge}

Recommendations:
- {specific recommendation}
- {specific recommendation}

Important:
1. Use professional clinical language
2. Be concise and clear
3. Maintain factual accuracy
4. Do not extrapolate beyond what's in the notes
5. Always use bullet points with a dash (-)
6. Keep exactly these section titles
7. Include all sections even if empty (use \"- None noted\" in this case)";

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("upstream response had no message content")]
    EmptyResponse,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// The API key is supplied per call; the backend never stores it.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Summarizer {
    pub fn new(config: &OpenAiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Ask the model to summarize `notes` in the fixed section layout.
    pub async fn summarize(&self, api_key: &str, notes: &str) -> Result<String, SummarizeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": format!(
                        "Please optimize these ABA therapy session notes:\n\n{notes}"
                    ),
                },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        let json: serde_json::Value = response.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(SummarizeError::EmptyResponse)?
            .to_string();

        if let Some(usage) = json.get("usage") {
            tracing::debug!(
                prompt_tokens = usage["prompt_tokens"].as_u64().unwrap_or(0),
                completion_tokens = usage["completion_tokens"].as_u64().unwrap_or(0),
                "summarization usage"
            );
        }

        Ok(content)
    }
}
