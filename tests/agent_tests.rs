//! End-to-end tests for the question-answering loop.
//!
//! These run against real temp-file SQLite databases with a scripted mock
//! oracle, so the whole generate -> select -> execute -> correct cycle is
//! exercised without a model.

use std::sync::Arc;

use insight_agent::agent::Agent;
use insight_agent::db::{DatabaseClient, SqliteClient, Value};
use insight_agent::error::AgentError;
use insight_agent::llm::MockCompletionClient;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

/// Creates a seeded Customer database and returns the client plus the
/// tempfile guard keeping it alive.
async fn seeded_db() -> (SqliteClient, NamedTempFile) {
    let file = NamedTempFile::new().expect("temp db file");
    let client = SqliteClient::new(file.path());

    client
        .execute_query("CREATE TABLE Customer (CustomerId INTEGER, Country TEXT);")
        .await
        .expect("create table");
    client
        .execute_query(
            "INSERT INTO Customer (CustomerId, Country) VALUES (1, 'Brazil'), (2, 'Norway'), (3, 'Brazil');",
        )
        .await
        .expect("seed rows");

    (client, file)
}

#[tokio::test]
async fn test_select_star_returns_columns_and_rows() {
    let (client, _file) = seeded_db().await;

    let result = client
        .execute_query("SELECT * FROM Customer;")
        .await
        .unwrap();

    assert_eq!(result.columns, vec!["CustomerId", "Country"]);
    assert_eq!(result.row_count(), 3);
    assert_eq!(
        result.rows[0],
        vec![Value::Int(1), Value::Text("Brazil".to_string())]
    );
    for row in &result.rows {
        assert_eq!(row.len(), result.column_count());
    }
}

#[tokio::test]
async fn test_empty_query_rejected_without_touching_store() {
    // A path that cannot be opened: if the executor contacted the store,
    // the error would be an open failure, not EmptyQuery.
    let client = SqliteClient::new("/nonexistent/dir/insight.db");

    let err = client.execute_query("").await.unwrap_err();
    assert!(matches!(err, AgentError::EmptyQuery));

    let err = client.execute_query("   \n").await.unwrap_err();
    assert!(matches!(err, AgentError::EmptyQuery));
}

#[tokio::test]
async fn test_store_error_passed_through_verbatim() {
    let (client, _file) = seeded_db().await;

    let err = client
        .execute_query("SELECT Countri FROM Customer;")
        .await
        .unwrap_err();

    match err {
        AgentError::Execution(msg) => assert_eq!(msg, "no such column: Countri"),
        other => panic!("expected Execution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_row_select_keeps_column_names() {
    let (client, _file) = seeded_db().await;

    let result = client
        .execute_query("SELECT CustomerId, Country FROM Customer WHERE CustomerId > 99;")
        .await
        .unwrap();

    assert_eq!(result.columns, vec!["CustomerId", "Country"]);
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_non_row_statement_yields_empty_columns() {
    let file = NamedTempFile::new().unwrap();
    let client = SqliteClient::new(file.path());

    let result = client
        .execute_query("CREATE TABLE t (id INTEGER);")
        .await
        .unwrap();

    assert!(result.columns.is_empty());
    assert!(result.rows.is_empty());
}

#[tokio::test]
async fn test_schema_introspection_lists_tables_and_columns() {
    let (client, _file) = seeded_db().await;
    client
        .execute_query("CREATE TABLE Invoice (InvoiceId INTEGER, Total REAL);")
        .await
        .unwrap();

    let schema = client.fetch_schema().await.unwrap();

    assert_eq!(schema.tables.len(), 2);
    assert_eq!(schema.tables[0].name, "Customer");
    assert_eq!(schema.tables[0].columns, vec!["CustomerId", "Country"]);
    assert_eq!(schema.tables[1].name, "Invoice");
    assert_eq!(
        schema.format_for_prompt(),
        "Customer(CustomerId, Country)\nInvoice(InvoiceId, Total)"
    );
}

#[tokio::test]
async fn test_idempotent_execution_yields_identical_tables() {
    let (client, _file) = seeded_db().await;
    let sql = "SELECT CustomerId, Country FROM Customer ORDER BY CustomerId;";

    let first = client.execute_query(sql).await.unwrap();
    let second = client.execute_query(sql).await.unwrap();

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn test_end_to_end_correction_round_resolves() {
    let (client, _file) = seeded_db().await;
    let db: Arc<dyn DatabaseClient> = Arc::new(client);

    // First round proposes a broken query; the correction round receives
    // SQLite's diagnostic and produces the fix.
    let llm = Arc::new(
        MockCompletionClient::new()
            .with_reply("SELECT Countri FROM Customer;")
            .with_reply("SELECT COUNT(*) FROM Customer;"),
    );
    let agent = Agent::new(db, llm.clone());

    let outcome = agent.answer("Count total customers.").await.unwrap();

    let answer = outcome.result.clone().expect("resolved");
    assert!(answer.corrected);
    assert_eq!(answer.table.row_count(), 1);
    assert_eq!(answer.table.column_count(), 1);
    assert_eq!(answer.table.rows[0], vec![Value::Int(3)]);

    // Intermediate error recorded, not surfaced.
    assert_eq!(outcome.attempts.len(), 2);
    assert_eq!(
        outcome.attempts[0].error.as_deref(),
        Some("no such column: Countri")
    );

    // The correction prompt carried the store diagnostic.
    assert!(llm.prompts()[1].contains("no such column: Countri"));
}

#[tokio::test]
async fn test_end_to_end_selection_prefers_higher_scoring_candidate() {
    let (client, _file) = seeded_db().await;
    let db: Arc<dyn DatabaseClient> = Arc::new(client);

    // 3 rows x 1 column scores 8; 3 rows x 2 columns scores 13.
    let llm = Arc::new(MockCompletionClient::new().with_reply(
        "SELECT Country FROM Customer;\nSELECT CustomerId, Country FROM Customer;",
    ));
    let agent = Agent::new(db, llm);

    let outcome = agent.answer("Show customers").await.unwrap();

    let answer = outcome.result.unwrap();
    assert_eq!(answer.sql, "SELECT CustomerId, Country FROM Customer;");
}

#[tokio::test]
async fn test_end_to_end_prose_only_oracle_fails_terminally() {
    let (client, _file) = seeded_db().await;
    let db: Arc<dyn DatabaseClient> = Arc::new(client);
    let llm = Arc::new(MockCompletionClient::new()); // only prose
    let agent = Agent::new(db, llm.clone());

    let outcome = agent.answer("Count total customers.").await.unwrap();

    assert!(!outcome.is_resolved());
    assert!(matches!(outcome.result, Err(AgentError::Generation(_))));
    // The initial round and the single correction round both ran.
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_recall_against_gold_result() {
    let (client, _file) = seeded_db().await;

    let gold = client
        .execute_query("SELECT CustomerId FROM Customer;")
        .await
        .unwrap();
    let partial = client
        .execute_query("SELECT CustomerId FROM Customer WHERE CustomerId < 3;")
        .await
        .unwrap();

    assert_eq!(gold.recall_against(&gold), 1.0);
    let recall = partial.recall_against(&gold);
    assert!((recall - 2.0 / 3.0).abs() < 1e-9);
}
