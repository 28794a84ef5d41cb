//! Chat completion API client
//!
//! One request per question:
//! - Endpoint: POST {base_url}/chat/completions
//! - Bearer credential, fixed temperature
//! - No retries, no streaming

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CompletionConfig;
use crate::errors::{DashboardError, Result};
use crate::prompt::PromptMessage;

/// Request timeout (120 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that turns a prompt into assistant text
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String>;
}

/// OpenAI-compatible chat completion client
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    token: String,
}

impl CompletionClient {
    /// Build a client from configuration; fails when no credential is set
    pub fn from_config(config: &CompletionConfig) -> Result<Self> {
        let token = config.token.clone().ok_or_else(|| {
            DashboardError::Config(format!("Missing {}", crate::config::TOKEN_ENV))
        })?;
        Self::with_config(&config.base_url, &config.model, config.temperature, &token)
    }

    pub fn with_config(base_url: &str, model: &str, temperature: f32, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DashboardError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
            token: token.to_string(),
        })
    }

    fn request<'a>(&'a self, messages: &'a [PromptMessage]) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages,
        }
    }

    /// Get current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&self.request(messages))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Upstream { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default())
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [PromptMessage],
}

/// Chat completion response, only the parts we read
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
