//! Database abstraction layer.
//!
//! Provides a trait-based interface for database operations, allowing the
//! real SQLite backend and the test mocks to be used interchangeably.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::{SchemaMetadata, TableInfo};
pub use sqlite::SqliteClient;
pub use types::{QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for database clients.
///
/// Implementations open their own connection per call; nothing is shared
/// across calls, so concurrent questions need no coordination.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Returns the current schema as an ordered table/column mapping.
    async fn fetch_schema(&self) -> Result<SchemaMetadata>;

    /// Executes a SQL query and returns the materialized result.
    ///
    /// A single deterministic attempt: no retries, no timeout. Store
    /// failures come back as `AgentError::Execution` with the store's own
    /// message; an empty query is rejected as `AgentError::EmptyQuery`
    /// without touching the store.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;
}
