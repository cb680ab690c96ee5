//! Execution-based candidate selection.
//!
//! Every candidate is run against the real store and scored from its result
//! shape; static analysis is deliberately not used. Executing all candidates
//! is the mechanism that filters out unsound ones, so it is not an
//! optimization target.

use crate::db::{DatabaseClient, QueryResult};
use tracing::debug;

/// Weight applied to the column count when scoring a result.
const COLUMN_WEIGHT: u64 = 5;

/// The winning candidate of a selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the candidate in generation order.
    pub index: usize,
    /// The candidate's SQL text.
    pub sql: String,
    /// The candidate's selection score.
    pub score: u64,
}

/// Result of running one selection round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Best-scoring successful candidate, if any executed successfully.
    pub best: Option<Selection>,
    /// The last candidate that failed execution, as (sql, store message).
    /// Kept so a round where everything failed can still seed a correction.
    pub last_failure: Option<(String, String)>,
}

/// Scores a successful result: `rows + columns * 5`.
///
/// Kept exactly as-is for behavioral compatibility; it validates that a
/// query runs and returns data, it does not judge answer correctness.
pub fn score(result: &QueryResult) -> u64 {
    result.row_count() as u64 + result.column_count() as u64 * COLUMN_WEIGHT
}

/// Executes every candidate in order and picks the best-scoring success.
///
/// Candidates that fail to execute are dropped from consideration; their
/// errors never surface beyond `last_failure`. On a score tie the earliest
/// candidate wins, so selection is stable with respect to generation order.
/// `best` is `None` when no candidate executes successfully.
pub async fn select_best(db: &dyn DatabaseClient, candidates: &[String]) -> SelectionOutcome {
    let mut outcome = SelectionOutcome::default();

    for (index, sql) in candidates.iter().enumerate() {
        match db.execute_query(sql).await {
            Ok(result) => {
                let candidate_score = score(&result);
                debug!(index, score = candidate_score, "candidate executed");

                let improves = outcome
                    .best
                    .as_ref()
                    .map(|b| candidate_score > b.score)
                    .unwrap_or(true);
                if improves {
                    outcome.best = Some(Selection {
                        index,
                        sql: sql.clone(),
                        score: candidate_score,
                    });
                }
            }
            Err(e) => {
                debug!(index, error = %e.message(), "candidate dropped");
                outcome.last_failure = Some((sql.clone(), e.message().to_string()));
            }
        }
    }

    outcome
}
