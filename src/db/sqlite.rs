//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait using sqlx. Every call opens its own short-lived connection and
//! closes it on all exit paths; there is no pool and no shared state.

use crate::db::{DatabaseClient, QueryResult, Row, SchemaMetadata, TableInfo, Value};
use crate::error::{AgentError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Connection, Executor, Row as SqlxRow, SqliteConnection, TypeInfo};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// SQLite database client addressed by a file path.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
}

impl SqliteClient {
    /// Creates a client for the database file at `path`.
    ///
    /// The file is not touched here; each operation connects on demand.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the database file.
    async fn connect(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new().filename(&self.path);
        SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| AgentError::execution(format!("Failed to open database: {e}")))
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn fetch_schema(&self) -> Result<SchemaMetadata> {
        let mut conn = self.connect().await?;

        let table_names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&mut conn)
        .await
        .map_err(|e| AgentError::execution(format!("Failed to fetch tables: {e}")))?;

        let mut tables = Vec::with_capacity(table_names.len());
        for name in table_names {
            let escaped = name.replace('\'', "''");
            let columns: Vec<String> =
                sqlx::query_scalar(&format!("SELECT name FROM pragma_table_info('{escaped}')"))
                    .fetch_all(&mut conn)
                    .await
                    .map_err(|e| {
                        AgentError::execution(format!("Failed to fetch columns for {name}: {e}"))
                    })?;
            tables.push(TableInfo::new(name, columns));
        }

        let _ = conn.close().await;
        Ok(SchemaMetadata::from_tables(tables))
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if sql.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        let mut conn = self.connect().await?;
        let start = Instant::now();

        let fetched = sqlx::query(sql).fetch_all(&mut conn).await;
        let execution_time = start.elapsed();

        let result = match fetched {
            Ok(rows) => {
                // Column names come from the first row when there is one;
                // an empty result carries no metadata, so fall back to
                // describing the prepared statement.
                let columns: Vec<String> = if let Some(first_row) = rows.first() {
                    first_row
                        .columns()
                        .iter()
                        .map(|col| col.name().to_string())
                        .collect()
                } else {
                    match conn.describe(sql).await {
                        Ok(described) => described
                            .columns()
                            .iter()
                            .map(|col| col.name().to_string())
                            .collect(),
                        Err(_) => Vec::new(),
                    }
                };

                let rows: Vec<Row> = rows.iter().map(convert_row).collect();
                debug!(
                    rows = rows.len(),
                    columns = columns.len(),
                    elapsed_ms = execution_time.as_millis() as u64,
                    "query executed"
                );

                Ok(QueryResult {
                    columns,
                    rows,
                    execution_time,
                })
            }
            Err(e) => Err(AgentError::execution(format_store_error(e))),
        };

        let _ = conn.close().await;
        result
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
fn convert_value(row: &SqliteRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Blob)
            .unwrap_or(Value::Null),

        // TEXT and anything else: try to get as string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

/// Extracts the store's own diagnostic text from a sqlx error.
///
/// The message is passed through unmodified so the correction prompt sees
/// exactly what SQLite said.
fn format_store_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
