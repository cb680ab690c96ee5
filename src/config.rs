//! Configuration management.
//!
//! Handles loading configuration from TOML files, with CLI arguments taking
//! precedence over file values and file values over built-in defaults.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmSettings,

    /// Agent loop configuration.
    #[serde(default)]
    pub agent: AgentSettings,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider: "ollama" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name (e.g., "llama3:latest").
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override for the provider API.
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "llama3:latest".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
        }
    }
}

/// Agent loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Number of candidate queries requested per generation round.
    #[serde(default = "default_candidates")]
    pub candidates: usize,

    /// Correction rounds allowed after the initial round.
    #[serde(default = "default_max_correction_rounds")]
    pub max_correction_rounds: usize,
}

fn default_candidates() -> usize {
    4
}

fn default_max_correction_rounds() -> usize {
    1
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            max_correction_rounds: default_max_correction_rounds(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseSettings {
    /// Path to the SQLite database file.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration; a malformed file is
    /// a configuration error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AgentError::config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| AgentError::config(format!("Invalid config file: {e}")))
    }

    /// Returns the default config file path.
    ///
    /// `~/.config/insight/config.toml` on Linux, the platform equivalent
    /// elsewhere.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("insight")
            .join("config.toml")
    }
}
