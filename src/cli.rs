//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// An autonomous natural-language data analytics agent for SQLite.
#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Natural-language question to answer against the database
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Path to the SQLite database file
    #[arg(short = 'd', long, value_name = "PATH", env = "INSIGHT_DB")]
    pub db: Option<PathBuf>,

    /// Model name (e.g., "llama3:latest")
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// LLM provider to use ("ollama" or "mock")
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Number of candidate queries to request per generation round
    #[arg(short = 'k', long, value_name = "N")]
    pub candidates: Option<usize>,

    /// Correction rounds allowed after the initial round
    #[arg(long, value_name = "N")]
    pub retries: Option<usize>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the database schema and exit
    #[arg(long)]
    pub schema: bool,

    /// Print every attempted SQL statement, not just the final one
    #[arg(long)]
    pub show_attempts: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_db() {
        let cli = Cli::parse_from([
            "insight",
            "--db",
            "data/chinook.sqlite",
            "Count total customers.",
        ]);

        assert_eq!(cli.question.as_deref(), Some("Count total customers."));
        assert_eq!(cli.db, Some(PathBuf::from("data/chinook.sqlite")));
        assert!(!cli.schema);
    }

    #[test]
    fn test_parse_schema_flag_without_question() {
        let cli = Cli::parse_from(["insight", "--db", "x.sqlite", "--schema"]);
        assert!(cli.schema);
        assert_eq!(cli.question, None);
    }

    #[test]
    fn test_parse_tuning_flags() {
        let cli = Cli::parse_from([
            "insight",
            "-d",
            "x.sqlite",
            "-k",
            "6",
            "--retries",
            "2",
            "-m",
            "llama3:8b",
            "--provider",
            "mock",
            "q",
        ]);

        assert_eq!(cli.candidates, Some(6));
        assert_eq!(cli.retries, Some(2));
        assert_eq!(cli.model.as_deref(), Some("llama3:8b"));
        assert_eq!(cli.provider.as_deref(), Some("mock"));
    }

    #[test]
    fn test_config_path_default() {
        let cli = Cli::parse_from(["insight"]);
        assert!(cli.config_path().ends_with("insight/config.toml"));
    }
}
