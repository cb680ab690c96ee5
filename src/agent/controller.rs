//! Self-correction controller.
//!
//! Orchestrates the generate -> select -> execute cycle and, when a round
//! fails, runs a bounded number of correction rounds seeded with the failure
//! message. States:
//! `Initial -> Selected -> Executed -> {Resolved | Retrying} -> {Resolved | Failed}`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::selector;
use crate::db::{DatabaseClient, QueryResult, SchemaMetadata};
use crate::error::{AgentError, Result};
use crate::llm::{build_prompt, extract_candidates, CompletionClient};

/// Default number of candidates requested per generation round.
const DEFAULT_CANDIDATES: usize = 4;

/// Default number of correction rounds after the initial one.
const DEFAULT_MAX_CORRECTION_ROUNDS: usize = 1;

/// Diagnostic used when no generation round produced a usable candidate.
const NO_CANDIDATES_MSG: &str = "no candidates generated";

/// One executed query and its outcome, recorded for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Generation round the query came from (0 = initial).
    pub round: usize,
    /// The SQL text that was executed.
    pub sql: String,
    /// The store's diagnostic when the execution failed.
    pub error: Option<String>,
}

/// A resolved question: the winning query and its result table.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The SQL that produced the table.
    pub sql: String,
    /// The materialized result.
    pub table: QueryResult,
    /// True when the answer came from a correction round.
    pub corrected: bool,
}

/// Terminal outcome of one question: exactly one of table or error, plus
/// every intermediate SQL attempted along the way.
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    /// The final result or the terminal error.
    pub result: Result<Answer>,
    /// Queries whose execution decided a round, in order.
    pub attempts: Vec<Attempt>,
}

impl QuestionOutcome {
    /// Returns true if the question resolved to a result table.
    pub fn is_resolved(&self) -> bool {
        self.result.is_ok()
    }
}

/// The question-answering agent.
///
/// Constructed per call site with its own database and completion clients;
/// holds no hidden global state, so independent agents are independent
/// sessions.
pub struct Agent {
    db: Arc<dyn DatabaseClient>,
    llm: Arc<dyn CompletionClient>,
    candidates: usize,
    max_correction_rounds: usize,
}

impl Agent {
    /// Creates an agent with default candidate count and retry bound.
    pub fn new(db: Arc<dyn DatabaseClient>, llm: Arc<dyn CompletionClient>) -> Self {
        Self {
            db,
            llm,
            candidates: DEFAULT_CANDIDATES,
            max_correction_rounds: DEFAULT_MAX_CORRECTION_ROUNDS,
        }
    }

    /// Sets the number of candidates requested per generation round.
    pub fn with_candidates(mut self, candidates: usize) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the number of correction rounds allowed after the initial one.
    pub fn with_max_correction_rounds(mut self, rounds: usize) -> Self {
        self.max_correction_rounds = rounds;
        self
    }

    /// Answers a question, fetching a fresh schema snapshot first.
    pub async fn answer(&self, question: &str) -> Result<QuestionOutcome> {
        let schema = self.db.fetch_schema().await?;
        Ok(self.answer_with_schema(question, &schema).await)
    }

    /// Answers a question against the given schema snapshot.
    ///
    /// Runs the initial round and at most `max_correction_rounds` further
    /// rounds, each seeded with the previous round's failure message. The
    /// outcome of the last round is terminal either way.
    pub async fn answer_with_schema(
        &self,
        question: &str,
        schema: &SchemaMetadata,
    ) -> QuestionOutcome {
        let mut attempts: Vec<Attempt> = Vec::new();
        let mut last_error: Option<String> = None;

        for round in 0..=self.max_correction_rounds {
            if round == 0 {
                debug!(round, "state: initial");
            } else {
                info!(round, "state: retrying with error context");
            }

            let prompt = build_prompt(question, schema, self.candidates, last_error.as_deref());
            let raw = match self.llm.complete(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    // An unreachable oracle degrades to "no candidates",
                    // never a crash.
                    warn!(error = %e, "completion failed; treating as empty output");
                    String::new()
                }
            };

            let candidates = extract_candidates(raw.trim(), self.candidates);
            debug!(round, count = candidates.len(), "candidates extracted");

            let selection = selector::select_best(self.db.as_ref(), &candidates).await;

            let Some(best) = selection.best else {
                // Nothing executed successfully this round. If a candidate
                // at least reached the store, its error seeds the next
                // round and stays on record.
                if let Some((sql, error)) = selection.last_failure {
                    attempts.push(Attempt {
                        round,
                        sql,
                        error: Some(error.clone()),
                    });
                    last_error = Some(error);
                }

                if round == self.max_correction_rounds {
                    debug!(round, "state: failed (rounds exhausted)");
                    let error = match last_error {
                        Some(message) => AgentError::unresolved(message),
                        None => AgentError::generation(NO_CANDIDATES_MSG),
                    };
                    return QuestionOutcome {
                        result: Err(error),
                        attempts,
                    };
                }
                continue;
            };

            debug!(round, index = best.index, score = best.score, "state: selected");

            // The selected query is executed once more; this execution's
            // outcome is what the caller sees.
            match self.db.execute_query(&best.sql).await {
                Ok(table) => {
                    debug!(round, "state: resolved");
                    attempts.push(Attempt {
                        round,
                        sql: best.sql.clone(),
                        error: None,
                    });
                    return QuestionOutcome {
                        result: Ok(Answer {
                            sql: best.sql,
                            table,
                            corrected: round > 0,
                        }),
                        attempts,
                    };
                }
                Err(e) => {
                    let message = e.message().to_string();
                    warn!(round, error = %message, "selected query failed");
                    attempts.push(Attempt {
                        round,
                        sql: best.sql,
                        error: Some(message.clone()),
                    });

                    if round == self.max_correction_rounds {
                        debug!(round, "state: failed (rounds exhausted)");
                        return QuestionOutcome {
                            result: Err(AgentError::unresolved(message)),
                            attempts,
                        };
                    }
                    last_error = Some(message);
                }
            }
        }

        // The last loop round always returns.
        unreachable!("correction loop must produce a terminal outcome")
    }
}
