//! Error types for InsightAgent.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for InsightAgent operations.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM transport errors (connection refused, timeouts, malformed responses).
    #[error("LLM error: {0}")]
    Llm(String),

    /// No query text was available to execute.
    #[error("Empty SQL")]
    EmptyQuery,

    /// The model produced no usable SQL candidates.
    #[error("Generation failure: {0}")]
    Generation(String),

    /// The store rejected a query; the message is the store's own diagnostic.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Terminal failure after the correction round was exhausted.
    #[error("Unresolved failure: {0}")]
    Unresolved(String),
}

impl AgentError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a generation error with the given message.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Creates an execution error carrying the store's message verbatim.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a terminal unresolved error with the given message.
    pub fn unresolved(msg: impl Into<String>) -> Self {
        Self::Unresolved(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Llm(_) => "LLM Error",
            Self::EmptyQuery => "Empty Query",
            Self::Generation(_) => "Generation Failure",
            Self::Execution(_) => "Execution Error",
            Self::Unresolved(_) => "Unresolved Failure",
        }
    }

    /// Returns the underlying message text, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m)
            | Self::Llm(m)
            | Self::Generation(m)
            | Self::Execution(m)
            | Self::Unresolved(m) => m,
            Self::EmptyQuery => "Empty SQL",
        }
    }
}

/// Result type alias using AgentError.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_execution() {
        let err = AgentError::execution("no such column: Countri");
        assert_eq!(err.to_string(), "Execution error: no such column: Countri");
        assert_eq!(err.category(), "Execution Error");
        assert_eq!(err.message(), "no such column: Countri");
    }

    #[test]
    fn test_error_display_empty_query() {
        let err = AgentError::EmptyQuery;
        assert_eq!(err.to_string(), "Empty SQL");
        assert_eq!(err.category(), "Empty Query");
    }

    #[test]
    fn test_error_display_generation() {
        let err = AgentError::generation("no candidates generated");
        assert_eq!(
            err.to_string(),
            "Generation failure: no candidates generated"
        );
        assert_eq!(err.category(), "Generation Failure");
    }

    #[test]
    fn test_error_display_unresolved() {
        let err = AgentError::unresolved("near \"FORM\": syntax error");
        assert_eq!(
            err.to_string(),
            "Unresolved failure: near \"FORM\": syntax error"
        );
        assert_eq!(err.category(), "Unresolved Failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = AgentError::config("missing field 'path' in [database]");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing field 'path' in [database]"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AgentError>();
    }
}
