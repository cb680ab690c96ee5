//! Schema metadata types.
//!
//! Represents the tables and columns of a database in a defined order, so
//! that prompt text built from the schema is reproducible.

use serde::{Deserialize, Serialize};

/// Ordered schema metadata: tables in introspection order, columns in
/// declaration order.
///
/// Iteration order is part of the contract; identical metadata always
/// renders to identical prompt text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    /// All user tables, in the order reported by the store.
    pub tables: Vec<TableInfo>,
}

/// A single table and its column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name, unique within the schema.
    pub name: String,
    /// Column names in declaration order.
    pub columns: Vec<String>,
}

impl TableInfo {
    /// Creates a new table description.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

impl SchemaMetadata {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates schema metadata from (table, columns) pairs.
    pub fn from_tables(tables: Vec<TableInfo>) -> Self {
        Self { tables }
    }

    /// Returns true if the schema contains no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Formats the schema for inclusion in an LLM prompt.
    ///
    /// One line per table: `Name(col1, col2, ...)`.
    pub fn format_for_prompt(&self) -> String {
        self.tables
            .iter()
            .map(|t| format!("{}({})", t.name, t.columns.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_schema() -> SchemaMetadata {
        SchemaMetadata::from_tables(vec![
            TableInfo::new(
                "Customer",
                vec![
                    "CustomerId".to_string(),
                    "Name".to_string(),
                    "Country".to_string(),
                ],
            ),
            TableInfo::new(
                "Invoice",
                vec!["InvoiceId".to_string(), "Total".to_string()],
            ),
        ])
    }

    #[test]
    fn test_format_for_prompt() {
        let schema = sample_schema();
        assert_eq!(
            schema.format_for_prompt(),
            "Customer(CustomerId, Name, Country)\nInvoice(InvoiceId, Total)"
        );
    }

    #[test]
    fn test_format_preserves_order() {
        let mut schema = sample_schema();
        schema.tables.reverse();
        assert!(schema.format_for_prompt().starts_with("Invoice("));
    }

    #[test]
    fn test_format_empty_schema() {
        let schema = SchemaMetadata::new();
        assert!(schema.is_empty());
        assert_eq!(schema.format_for_prompt(), "");
    }

    #[test]
    fn test_format_is_deterministic() {
        let schema = sample_schema();
        assert_eq!(schema.format_for_prompt(), schema.format_for_prompt());
    }
}
