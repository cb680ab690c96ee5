//! LLM integration.
//!
//! The model is a narrow text-completion oracle: one prompt in, one block of
//! text out. Everything else (prompt construction, candidate extraction)
//! lives beside it so transports stay swappable.

pub mod extract;
pub mod mock;
pub mod ollama;
pub mod prompt;

pub use extract::extract_candidates;
pub use mock::MockCompletionClient;
pub use ollama::{OllamaClient, OllamaConfig};
pub use prompt::build_prompt;

use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Result;

/// Trait for clients that can complete a text prompt.
///
/// A single blocking call per invocation; no streaming, no structured
/// protocol. Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generates a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Local Ollama instance (the default; no external API calls).
    #[default]
    Ollama,
    /// Mock client for testing (no model required).
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates a completion client for the given provider and model.
pub fn create_client(
    provider: LlmProvider,
    model: &str,
    base_url: Option<&str>,
) -> Result<Arc<dyn CompletionClient>> {
    match provider {
        LlmProvider::Ollama => {
            let mut config = OllamaConfig::new(model);
            if let Some(url) = base_url {
                config = config.with_url(url);
            }
            Ok(Arc::new(OllamaClient::new(config)?))
        }
        LlmProvider::Mock => Ok(Arc::new(MockCompletionClient::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "ollama".parse::<LlmProvider>().unwrap(),
            LlmProvider::Ollama
        );
        assert_eq!(
            "Ollama".parse::<LlmProvider>().unwrap(),
            LlmProvider::Ollama
        );
        assert_eq!("mock".parse::<LlmProvider>().unwrap(), LlmProvider::Mock);
        assert!("claude".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(LlmProvider::Ollama.to_string(), "ollama");
        assert_eq!(LlmProvider::Mock.to_string(), "mock");
    }

    #[test]
    fn test_create_mock_client() {
        let client = create_client(LlmProvider::Mock, "unused", None);
        assert!(client.is_ok());
    }
}
