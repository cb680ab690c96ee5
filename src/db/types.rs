//! Query result types.
//!
//! Defines the structures used to represent tabular results from the database.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Represents the result of executing a SQL query.
///
/// Exactly one of result/error is ever produced per execution; this type is
/// the success side. Column order and row order are preserved as returned by
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Ordered column names from the query's result descriptor.
    pub columns: Vec<String>,

    /// Rows of data; every row has exactly `columns.len()` values.
    pub rows: Vec<Row>,

    /// Time taken to execute the query.
    #[serde(skip)]
    pub execution_time: Duration,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query result with the given columns and rows.
    pub fn with_data(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            execution_time: Duration::ZERO,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, duration: Duration) -> Self {
        self.execution_time = duration;
        self
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row-level recall of `gold`'s rows within this result.
    ///
    /// Rows are compared as rendered tuples, so column types only need to
    /// format identically. An empty gold set counts as full recall. Used by
    /// evaluation harnesses, never by the agent loop itself.
    pub fn recall_against(&self, gold: &QueryResult) -> f64 {
        let gold_rows: HashSet<String> = gold.rows.iter().map(|r| render_row_key(r)).collect();
        if gold_rows.is_empty() {
            return 1.0;
        }

        let own_rows: HashSet<String> = self.rows.iter().map(|r| render_row_key(r)).collect();
        let hits = gold_rows.intersection(&own_rows).count();
        hits as f64 / gold_rows.len() as f64
    }

    /// Renders the result as an aligned text table for terminal output.
    pub fn render_table(&self) -> String {
        if self.columns.is_empty() {
            return String::from("(no columns)");
        }

        let rendered_rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &rendered_rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect();
        out.push_str(&header.join(" | "));
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');

        for row in &rendered_rows {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(cell.len());
                    format!("{:<width$}", cell, width = width)
                })
                .collect();
            out.push_str(&line.join(" | "));
            out.push('\n');
        }

        out
    }
}

/// Renders a row as a single comparable key for recall computation.
fn render_row_key(row: &Row) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single scalar value from the database.
///
/// SQLite's storage classes map directly: NULL, INTEGER, REAL, TEXT, BLOB.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value.
    Text(String),

    /// Binary data.
    Blob(Vec<u8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}
