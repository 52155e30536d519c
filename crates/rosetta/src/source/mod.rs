//! Relational data source capability.
//!
//! The pipeline never talks to a database driver directly. Everything it
//! needs (column introspection, row sampling, distinct-value aggregates) goes
//! through the [`DataSource`] trait, and each implementation is responsible
//! for quoting identifiers safely for its own SQL dialect.
//!
//! # Implementations
//!
//! - [`SqliteSource`] - bundled SQLite, read-only, one connection per call
//! - [`PostgresSource`] - PostgreSQL through sqlx, with table and column
//!   comments (`postgres` feature)
//! - [`MockSource`] - in-memory tables for tests and dry runs
//!
//! [`connect`] picks the implementation from a connection string.

mod mock;
#[cfg(feature = "postgres")]
mod postgres;
mod quote;
mod sqlite;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{ColumnMetadata, SampleRow, Scalar};

pub use mock::MockSource;
#[cfg(feature = "postgres")]
pub use postgres::PostgresSource;
pub use quote::{quote_identifier, quote_table, split_table};
pub use sqlite::SqliteSource;

fn is_postgres_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

/// Open the data source a connection string names.
///
/// `postgres://` and `postgresql://` URLs open a [`PostgresSource`];
/// anything else is handed to [`SqliteSource::from_url`], which waits up to
/// `busy_timeout` on a locked database.
pub fn connect(url: &str, busy_timeout: Duration) -> Result<Arc<dyn DataSource>> {
    if is_postgres_url(url) {
        return open_postgres(url);
    }
    let source = SqliteSource::from_url(url)?.with_busy_timeout(busy_timeout);
    Ok(Arc::new(source))
}

#[cfg(feature = "postgres")]
fn open_postgres(url: &str) -> Result<Arc<dyn DataSource>> {
    Ok(Arc::new(PostgresSource::from_url(url)?))
}

#[cfg(not(feature = "postgres"))]
fn open_postgres(_url: &str) -> Result<Arc<dyn DataSource>> {
    Err(crate::error::RosettaError::Config(
        "this build has no PostgreSQL support (enable the `postgres` feature)".to_string(),
    ))
}

/// A table visible in the data source, with its column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
    pub column_count: usize,
}

impl TableRef {
    /// `schema.table` form of this reference.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// Trait for relational data sources.
///
/// Table identifiers may be bare (`users`) or schema-qualified
/// (`public.users`). Implementations must be thread-safe so a source can be
/// moved onto a blocking worker by the HTTP service.
pub trait DataSource: Send + Sync {
    /// Column metadata in declaration order.
    ///
    /// A table with no visible columns is reported as
    /// [`RosettaError::UnknownTable`](crate::RosettaError::UnknownTable).
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>>;

    /// Table-level comment, if the source supports comments.
    fn get_table_comment(&self, table: &str) -> Result<Option<String>>;

    /// Up to `limit` rows in the source's default order.
    fn sample_rows(&self, table: &str, limit: usize) -> Result<Vec<SampleRow>>;

    /// Number of distinct non-null values in a column.
    fn count_distinct(&self, table: &str, column: &str) -> Result<u64>;

    /// Distinct non-null values in a column, sorted ascending.
    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<Scalar>>;

    /// Every user table, across all schemas.
    fn list_tables(&self) -> Result<Vec<TableRef>>;

    /// Schema that unqualified table names resolve to.
    fn default_schema(&self) -> &str;

    /// Name of this source (for logging/debugging).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosettaError;
    use rusqlite::Connection;
    use tempfile::TempDir;

    #[test]
    fn test_connect_dispatches_on_scheme() {
        assert!(is_postgres_url("postgres://u@h/db"));
        assert!(is_postgres_url("  postgresql://u@h/db"));
        assert!(!is_postgres_url("sqlite://app.db"));
        assert!(!is_postgres_url("app.db"));
    }

    #[test]
    fn test_connect_opens_sqlite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (a TEXT);")
            .unwrap();

        let source = connect(&format!("sqlite://{}", path.display()), Duration::from_millis(10))
            .unwrap();
        assert_eq!(source.name(), "sqlite");
        assert_eq!(source.get_columns("t").unwrap().len(), 1);
    }

    #[test]
    fn test_connect_rejects_unknown_drivers() {
        let err = connect("mysql://u@h/db", Duration::from_millis(10)).err().unwrap();
        assert!(matches!(err, RosettaError::Config(_)));
    }
}
