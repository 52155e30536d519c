//! In-memory data source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;

use crate::error::{Result, RosettaError};
use crate::schema::{ColumnMetadata, SampleRow, Scalar};

use super::quote::split_table;
use super::{DataSource, TableRef};

#[derive(Debug, Clone, Default)]
struct MockTable {
    columns: Vec<ColumnMetadata>,
    comment: Option<String>,
    rows: Vec<SampleRow>,
    distinct: HashMap<String, Vec<Scalar>>,
}

/// Mock data source that serves predefined tables and counts queries.
#[derive(Debug, Default)]
pub struct MockSource {
    tables: IndexMap<String, MockTable>,
    queries: AtomicUsize,
}

impl MockSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with its columns.
    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        self.tables.entry(table.into()).or_default().columns = columns;
        self
    }

    /// Set a table comment.
    pub fn with_comment(mut self, table: &str, comment: impl Into<String>) -> Self {
        self.tables.entry(table.to_string()).or_default().comment = Some(comment.into());
        self
    }

    /// Set the rows a table holds.
    pub fn with_rows(mut self, table: &str, rows: Vec<SampleRow>) -> Self {
        self.tables.entry(table.to_string()).or_default().rows = rows;
        self
    }

    /// Override the distinct values reported for a column.
    ///
    /// Without an override, distinct values are computed from the table's rows.
    pub fn with_distinct_values(mut self, table: &str, column: &str, values: Vec<Scalar>) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .distinct
            .insert(column.to_string(), values);
        self
    }

    /// Number of queries issued against this source so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn table(&self, table: &str) -> Result<&MockTable> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.tables
            .get(table)
            .filter(|t| !t.columns.is_empty())
            .ok_or_else(|| RosettaError::UnknownTable(table.to_string()))
    }

    fn distinct(&self, table: &str, column: &str) -> Result<Vec<Scalar>> {
        let mock = self.table(table)?;
        if !mock.columns.iter().any(|c| c.name == column) {
            return Err(RosettaError::UnknownTable(format!("{}.{}", table, column)));
        }
        if let Some(values) = mock.distinct.get(column) {
            return Ok(values.clone());
        }

        let mut values: Vec<Scalar> = Vec::new();
        for value in mock.rows.iter().filter_map(|row| row.get(column)) {
            if !value.is_null() && !values.contains(value) {
                values.push(value.clone());
            }
        }
        values.sort_by_key(|v| v.to_string());
        Ok(values)
    }
}

impl DataSource for MockSource {
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>> {
        Ok(self.table(table)?.columns.clone())
    }

    fn get_table_comment(&self, table: &str) -> Result<Option<String>> {
        Ok(self.table(table)?.comment.clone())
    }

    fn sample_rows(&self, table: &str, limit: usize) -> Result<Vec<SampleRow>> {
        Ok(self.table(table)?.rows.iter().take(limit).cloned().collect())
    }

    fn count_distinct(&self, table: &str, column: &str) -> Result<u64> {
        Ok(self.distinct(table, column)?.len() as u64)
    }

    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<Scalar>> {
        self.distinct(table, column)
    }

    fn list_tables(&self) -> Result<Vec<TableRef>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .iter()
            .map(|(name, table)| {
                let (schema, bare) = split_table(name);
                TableRef {
                    schema: schema.unwrap_or(self.default_schema()).to_string(),
                    name: bare.to_string(),
                    column_count: table.columns.len(),
                }
            })
            .collect())
    }

    fn default_schema(&self) -> &str {
        "main"
    }

    fn name(&self) -> &str {
        "mock"
    }
}
