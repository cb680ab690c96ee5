//! InsightAgent - an autonomous natural-language data analytics agent.
//!
//! Converts a question into SQL candidates via a local LLM, validates them
//! by execution, and self-corrects once on failure.

use std::str::FromStr;
use std::sync::Arc;

use insight_agent::agent::{Agent, QuestionOutcome};
use insight_agent::cli::Cli;
use insight_agent::config::Config;
use insight_agent::db::{DatabaseClient, SqliteClient};
use insight_agent::error::{AgentError, Result};
use insight_agent::llm::{self, LlmProvider};
use insight_agent::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e.message());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    let config = Config::load_from_file(&config_path)?;

    let db_path = cli
        .db
        .clone()
        .or_else(|| config.database.path.clone())
        .ok_or_else(|| {
            AgentError::config("No database configured. Pass --db or set [database].path")
        })?;
    let db = Arc::new(SqliteClient::new(db_path));

    if cli.schema {
        let schema = db.fetch_schema().await?;
        println!("{}", schema.format_for_prompt());
        return Ok(());
    }

    let question = cli
        .question
        .clone()
        .ok_or_else(|| AgentError::config("No question given. Run with --help for usage"))?;

    let provider_name = cli
        .provider
        .clone()
        .unwrap_or_else(|| config.llm.provider.clone());
    let provider = LlmProvider::from_str(&provider_name).map_err(AgentError::Config)?;
    let model = cli.model.clone().unwrap_or_else(|| config.llm.model.clone());
    let client = llm::create_client(provider, &model, config.llm.base_url.as_deref())?;

    let agent = Agent::new(db, client)
        .with_candidates(cli.candidates.unwrap_or(config.agent.candidates))
        .with_max_correction_rounds(cli.retries.unwrap_or(config.agent.max_correction_rounds));

    info!(provider = %provider, model = %model, "answering question");
    let outcome = agent.answer(&question).await?;

    report(&outcome, cli.show_attempts);

    if outcome.is_resolved() {
        Ok(())
    } else {
        // Diagnostics were already printed; exit non-zero without
        // duplicating them.
        std::process::exit(2);
    }
}

/// Prints the outcome of one question to stdout.
fn report(outcome: &QuestionOutcome, show_attempts: bool) {
    if show_attempts {
        for attempt in &outcome.attempts {
            match &attempt.error {
                Some(error) => println!(
                    "[round {}] {}\n  failed: {}",
                    attempt.round, attempt.sql, error
                ),
                None => println!("[round {}] {}", attempt.round, attempt.sql),
            }
        }
        println!();
    }

    match &outcome.result {
        Ok(answer) => {
            if answer.corrected {
                println!("(recovered after a correction round)");
            }
            println!("Generated SQL:\n{}\n", answer.sql);

            if answer.table.is_empty() {
                println!("Query executed successfully - but returned no data.");
            } else {
                print!("{}", answer.table.render_table());
                println!(
                    "\n{} row(s) in {} ms",
                    answer.table.row_count(),
                    answer.table.execution_time.as_millis()
                );
            }
        }
        Err(AgentError::Generation(msg)) => {
            println!("Failed to generate SQL ({msg}). Is the model running?");
        }
        Err(e) => {
            println!("Agent could not resolve the error: {}", e.message());
        }
    }
}
