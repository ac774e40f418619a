use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::gemini::GeminiClient;

/// Errors from the external LLM capability
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport or connection failure
    #[error("LLM request failed: {0}")]
    Request(String),
    /// The call did not finish within the allotted time
    #[error("LLM request timed out")]
    Timeout,
    /// The provider answered with a non-success status
    #[error("LLM API error: {status} - {body}")]
    Api { status: u16, body: String },
    /// The provider envelope could not be decoded
    #[error("failed to parse LLM API response: {0}")]
    Parse(String),
    /// The provider returned no text content
    #[error("LLM returned no text content")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs can carry credentials; keep them out of logs and stored summaries
        let e = e.without_url();
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::Parse(e.to_string())
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

/// Text generation capability used by the feedback orchestrator
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a completion for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}

/// Which LLM provider to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    Anthropic,
}

impl LlmProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(LlmProvider::Gemini),
            "anthropic" | "claude" => Some(LlmProvider::Anthropic),
            _ => None,
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.5-flash",
            LlmProvider::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com",
            LlmProvider::Anthropic => "https://api.anthropic.com",
        }
    }
}

/// Configuration for the LLM client
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// API key; `None` when missing or a placeholder
    pub api_key: Option<String>,
    /// Model to use (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Base URL of the provider API, without trailing slash
    pub base_url: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl LlmConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Recognized keys: `PODIUM_LLM_PROVIDER`, `GEMINI_API_KEY`,
    /// `ANTHROPIC_API_KEY`, `PODIUM_LLM_MODEL`, `PODIUM_LLM_BASE_URL`,
    /// `PODIUM_LLM_TIMEOUT_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("PODIUM_LLM_PROVIDER").filter(|v| !v.trim().is_empty()) {
            Some(value) => LlmProvider::parse(&value)
                .with_context(|| format!("Unknown PODIUM_LLM_PROVIDER: {:?}", value))?,
            None => LlmProvider::Gemini,
        };

        let api_key = lookup(provider.api_key_var())
            .map(|k| k.trim().to_string())
            .filter(|k| is_valid_api_key(k));

        let model = lookup("PODIUM_LLM_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        let base_url = lookup("PODIUM_LLM_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match lookup("PODIUM_LLM_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid PODIUM_LLM_TIMEOUT_SECS: {:?}", value))?,
            None => 30,
        };

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature: 0.3,
            max_tokens: 2048,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create with custom settings
    pub fn new(provider: LlmProvider, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: Some(api_key.into()),
            model: provider.default_model().to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temperature: 0.3,
            max_tokens: 2048,
            timeout: Duration::from_secs(30),
        }
    }

    /// Whether a usable API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn http_client(&self) -> Client {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Reject missing keys and obvious placeholders such as `your_api_key_here`
pub fn is_valid_api_key(key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    let lower = key.to_lowercase();
    if lower.starts_with("your_") || lower.contains("replace") || lower.contains("xxxxxxxx") {
        return false;
    }
    key.len() >= 20
}

/// Build the configured backend, or `None` when no usable API key is set
pub fn backend_from_config(config: &LlmConfig) -> Option<Arc<dyn LlmBackend>> {
    if !config.is_configured() {
        info!(
            "{} not set or looks invalid; feedback will use placeholder responses",
            config.provider.api_key_var()
        );
        return None;
    }

    let backend: Arc<dyn LlmBackend> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(config.clone())),
        LlmProvider::Anthropic => Arc::new(AnthropicClient::new(config.clone())),
    };
    info!("LLM: {} backend configured (model {})", backend.name(), config.model);
    Some(backend)
}

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: LlmConfig,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: config.http_client(),
            config,
        }
    }

    /// Send a message to Claude and get a response
    pub async fn send_message(&self, user: &str) -> Result<String, LlmError> {
        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", self.config.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        // Extract text from the first text content block
        response
            .content
            .into_iter()
            .find(|c| c.content_type == "text" && !c.text.is_empty())
            .map(|c| c.text)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl LlmBackend for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.send_message(prompt).await
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}
