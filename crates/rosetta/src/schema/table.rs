//! Table-level description consumed by the renderers.

use serde::{Deserialize, Serialize};

use super::column::EnrichedColumn;

/// Marker appended to audit labels the oracle supplied.
pub const INFERRED_MARKER: &str = "(Inferred)";

/// An enriched table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table identifier as whitelisted, possibly `schema.table`.
    pub table_name: String,
    /// Columns in the order the schema reader returned them.
    pub columns: Vec<EnrichedColumn>,
}

impl TableSpec {
    /// Create a table spec.
    pub fn new(table_name: impl Into<String>, columns: Vec<EnrichedColumn>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Get a column by its original name.
    pub fn get_column(&self, original_name: &str) -> Option<&EnrichedColumn> {
        self.columns.iter().find(|c| c.original_name == original_name)
    }

    /// Audit rows for every column of this table.
    pub fn audit_rows(&self) -> Vec<AuditRow> {
        self.columns
            .iter()
            .map(|column| AuditRow::from_column(&self.table_name, column))
            .collect()
    }
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRow {
    pub table_name: String,
    pub original_name: String,
    /// Semantic name, marked when it differs from the original.
    pub display_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AuditRow {
    /// Build the audit row for an enriched column.
    pub fn from_column(table_name: &str, column: &EnrichedColumn) -> Self {
        let display_label = if column.is_renamed() {
            format!("{} {}", column.semantic_name, INFERRED_MARKER)
        } else {
            column.semantic_name.clone()
        };

        Self {
            table_name: table_name.to_string(),
            original_name: column.original_name.clone(),
            display_label,
            description: column.description.clone(),
        }
    }
}
