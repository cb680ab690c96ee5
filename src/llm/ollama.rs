//! Ollama completion client implementation.
//!
//! Talks to a local Ollama instance over its HTTP API. The original system
//! shelled out to `ollama run`; the `/api/generate` endpoint is the same
//! prompt-in/text-out exchange without the subprocess plumbing.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AgentError, Result};
use crate::llm::CompletionClient;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default Ollama API URL.
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "llama3:latest";

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API.
    pub base_url: String,
    /// Model to use (e.g., "llama3:latest").
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Creates a new config with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: model.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

/// Ollama completion client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    /// Creates a new Ollama client with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `OLLAMA_URL` for the base URL (defaults to http://localhost:11434).
    /// Reads `OLLAMA_MODEL` for the model (defaults to "llama3:latest").
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::new(OllamaConfig::new(model).with_url(base_url))
    }

    /// Checks if Ollama is available at the configured URL.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }

    /// Returns the generate API endpoint URL.
    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::llm("Request timed out. Try again.")
                } else if e.is_connect() {
                    AgentError::llm(
                        "Failed to connect to Ollama. Is it running? Try: ollama serve",
                    )
                } else {
                    AgentError::llm(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::llm(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AgentError::llm(format!(
                "Ollama API error ({}): {}",
                status, body
            )));
        }

        let response: OllamaResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::llm(format!("Failed to parse response: {}", e)))?;

        Ok(response.response.trim().to_string())
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}
