//! Mock database clients for testing.
//!
//! Provide scripted results per SQL text so selector and controller
//! behavior can be tested without a real store.

use super::{DatabaseClient, QueryResult, SchemaMetadata, TableInfo, Value};
use crate::error::{AgentError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// A mock database client that returns predefined results keyed by SQL text.
///
/// Unscripted SELECT statements fall back to a single-cell result;
/// everything else fails with a canned store error.
#[derive(Default)]
pub struct MockDatabaseClient {
    schema: SchemaMetadata,
    scripted: Vec<(String, Result<QueryResult>)>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client with the given schema.
    pub fn with_schema(schema: SchemaMetadata) -> Self {
        Self {
            schema,
            scripted: Vec::new(),
        }
    }

    /// Scripts a successful result for an exact SQL text.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.scripted.push((sql.into(), Ok(result)));
        self
    }

    /// Scripts an execution error for an exact SQL text.
    pub fn with_error(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.scripted
            .push((sql.into(), Err(AgentError::execution(message))));
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch_schema(&self) -> Result<SchemaMetadata> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if sql.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        for (scripted_sql, outcome) in &self.scripted {
            if scripted_sql == sql {
                return outcome.clone();
            }
        }

        if sql.trim_start().to_uppercase().starts_with("SELECT") {
            Ok(QueryResult {
                columns: vec!["result".to_string()],
                rows: vec![vec![Value::Text(format!("Mock result for: {sql}"))]],
                execution_time: Duration::from_millis(1),
            })
        } else {
            Err(AgentError::execution(format!(
                "near \"{}\": syntax error",
                sql.split_whitespace().next().unwrap_or("")
            )))
        }
    }
}

/// A mock database client where every query fails.
///
/// Used to test total-failure paths.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given store diagnostic.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingDatabaseClient {
    fn default() -> Self {
        Self::new("no such table: missing")
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch_schema(&self) -> Result<SchemaMetadata> {
        Ok(SchemaMetadata::from_tables(vec![TableInfo::new(
            "missing",
            vec!["id".to_string()],
        )]))
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if sql.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }
        Err(AgentError::execution(self.message.clone()))
    }
}
