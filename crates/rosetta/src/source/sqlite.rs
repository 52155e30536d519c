//! SQLite data source.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, RosettaError};
use crate::schema::{ColumnMetadata, SampleRow, Scalar};

use super::quote::{quote_identifier, quote_table, split_table};
use super::{DataSource, TableRef};

/// Default time to wait on a locked database.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Read-only SQLite data source.
///
/// Holds only the database path. Every operation opens its own read-only
/// connection and drops it when done, so no connection outlives a query.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteSource {
    /// Open a database file, verifying that it can be connected to.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        };
        source.connect()?;
        Ok(source)
    }

    /// Open from a connection string.
    ///
    /// Accepts `sqlite://<path>`, `sqlite:<path>`, or a bare path.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RosettaError::Config(
                "database connection string is empty".to_string(),
            ));
        }

        let path = if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if let Some((scheme, _)) = url.split_once("://") {
            return Err(RosettaError::Config(format!(
                "unsupported database driver '{}': expected a sqlite path or a postgres:// URL",
                scheme
            )));
        } else {
            url
        };

        Self::open(path)
    }

    /// Override the busy timeout.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    fn table_columns(
        conn: &Connection,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ColumnMetadata>> {
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<ColumnMetadata> {
            let name: String = row.get(0)?;
            let declared_type: String = row.get(1)?;
            let not_null: i64 = row.get(2)?;
            let pk: i64 = row.get(3)?;
            Ok(ColumnMetadata {
                name,
                declared_type,
                comment: None,
                nullable: not_null == 0 && pk == 0,
                primary_key: pk > 0,
            })
        };

        let columns = match schema {
            Some(schema) => {
                let mut stmt = conn.prepare(
                    "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1, ?2) ORDER BY cid",
                )?;
                let rows = stmt.query_map(params![table, schema], map_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
                )?;
                let rows = stmt.query_map(params![table], map_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(columns)
    }
}

/// Convert a SQLite value into a scalar.
fn scalar_from(value: ValueRef<'_>) -> Scalar {
    match value {
        ValueRef::Null => Scalar::Null,
        ValueRef::Integer(i) => Scalar::Integer(i),
        ValueRef::Real(f) => Scalar::Float(f),
        ValueRef::Text(t) => Scalar::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Scalar::Text(format!("<{} bytes>", b.len())),
    }
}

impl DataSource for SqliteSource {
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>> {
        let conn = self.connect()?;
        let (schema, name) = split_table(table);
        let columns = Self::table_columns(&conn, schema, name)?;
        if columns.is_empty() {
            return Err(RosettaError::UnknownTable(table.to_string()));
        }
        debug!(table, columns = columns.len(), "read column metadata");
        Ok(columns)
    }

    fn get_table_comment(&self, _table: &str) -> Result<Option<String>> {
        // SQLite has no table comments.
        Ok(None)
    }

    fn sample_rows(&self, table: &str, limit: usize) -> Result<Vec<SampleRow>> {
        let conn = self.connect()?;
        let sql = format!("SELECT * FROM {} LIMIT ?1", quote_table(table));
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params![limit as i64])?;
        let mut samples = Vec::new();
        while let Some(row) = rows.next()? {
            let mut sample = SampleRow::new();
            for (idx, name) in names.iter().enumerate() {
                sample.insert(name.clone(), scalar_from(row.get_ref(idx)?));
            }
            samples.push(sample);
        }

        debug!(table, rows = samples.len(), "sampled rows");
        Ok(samples)
    }

    fn count_distinct(&self, table: &str, column: &str) -> Result<u64> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT COUNT(DISTINCT {}) FROM {}",
            quote_identifier(column),
            quote_table(table)
        );
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<Scalar>> {
        let conn = self.connect()?;
        let column = quote_identifier(column);
        let sql = format!(
            "SELECT DISTINCT {col} FROM {table} WHERE {col} IS NOT NULL ORDER BY {col}",
            col = column,
            table = quote_table(table)
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(scalar_from(row.get_ref(0)?));
        }
        Ok(values)
    }

    fn list_tables(&self) -> Result<Vec<TableRef>> {
        let conn = self.connect()?;

        let schemas: Vec<String> = {
            let mut stmt = conn.prepare("SELECT name FROM pragma_database_list ORDER BY seq")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect::<rusqlite::Result<Vec<String>>>()?
        };

        let mut tables = Vec::new();
        for schema in schemas.iter().filter(|s| s.as_str() != "temp") {
            let sql = format!(
                "SELECT name FROM {}.sqlite_master WHERE type = 'table' ORDER BY name",
                quote_identifier(schema)
            );
            let names: Vec<String> = {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect::<rusqlite::Result<Vec<String>>>()?
            };

            for name in names {
                let column_count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM pragma_table_info(?1, ?2)",
                    params![name, schema],
                    |row| row.get(0),
                )?;
                tables.push(TableRef {
                    schema: schema.clone(),
                    name,
                    column_count: column_count.max(0) as usize,
                });
            }
        }

        Ok(tables)
    }

    fn default_schema(&self) -> &str {
        "main"
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
