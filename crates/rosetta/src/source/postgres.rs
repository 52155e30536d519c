//! PostgreSQL data source.

use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, Connection, Row};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::{Result, RosettaError};
use crate::schema::{ColumnMetadata, SampleRow, Scalar};

use super::quote::{quote_identifier, quote_table, split_table};
use super::{DataSource, TableRef};

/// Schema unqualified names resolve to.
const DEFAULT_SCHEMA: &str = "public";

const COLUMNS_SQL: &str = r#"
SELECT c.column_name::text,
       c.data_type::text,
       c.is_nullable = 'YES',
       col_description(format('%I.%I', c.table_schema, c.table_name)::regclass, c.ordinal_position::int),
       EXISTS (
           SELECT 1
           FROM information_schema.table_constraints tc
           JOIN information_schema.key_column_usage k
             ON k.constraint_name = tc.constraint_name
            AND k.table_schema = tc.table_schema
            AND k.table_name = tc.table_name
           WHERE tc.constraint_type = 'PRIMARY KEY'
             AND tc.table_schema = c.table_schema
             AND tc.table_name = c.table_name
             AND k.column_name = c.column_name
       )
FROM information_schema.columns c
WHERE c.table_schema = $1 AND c.table_name = $2
ORDER BY c.ordinal_position
"#;

const TABLE_COMMENT_SQL: &str =
    "SELECT obj_description(format('%I.%I', $1::text, $2::text)::regclass, 'pg_class')";

const LIST_TABLES_SQL: &str = r#"
SELECT t.table_schema::text,
       t.table_name::text,
       (SELECT COUNT(*)
        FROM information_schema.columns c
        WHERE c.table_schema = t.table_schema AND c.table_name = t.table_name)
FROM information_schema.tables t
WHERE t.table_type = 'BASE TABLE'
  AND t.table_schema NOT IN ('pg_catalog', 'information_schema')
ORDER BY 1, 2
"#;

/// Read-only PostgreSQL data source.
///
/// Like [`SqliteSource`](super::SqliteSource), every operation opens its own
/// connection and closes it when done. Sessions are started with
/// `default_transaction_read_only` on. The driver is async, so the source
/// owns a single-threaded runtime and blocks on it; call it from a blocking
/// context (a CLI command or `spawn_blocking`), never from async code.
#[derive(Debug)]
pub struct PostgresSource {
    options: PgConnectOptions,
    runtime: Runtime,
}

impl PostgresSource {
    /// Open from a `postgres://` or `postgresql://` URL, verifying that it
    /// can be connected to.
    pub fn from_url(url: &str) -> Result<Self> {
        let options: PgConnectOptions = url.trim().parse()?;
        let options = options
            .application_name("rosetta")
            .options([("default_transaction_read_only", "on")]);
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(sqlx::Error::from)?;

        let source = Self { options, runtime };
        source.fetch_all("SELECT 1", &[])?;
        Ok(source)
    }

    fn fetch_all<'q>(&self, sql: &'q str, binds: &[&'q str]) -> Result<Vec<PgRow>> {
        let rows = self.runtime.block_on(async {
            let mut conn = self.options.connect().await?;
            let mut query = sqlx::query(sql);
            for value in binds {
                query = query.bind(*value);
            }
            let rows = query.fetch_all(&mut conn).await?;
            conn.close().await?;
            Ok::<_, sqlx::Error>(rows)
        })?;
        Ok(rows)
    }

    fn resolve<'t>(table: &'t str) -> (&'t str, &'t str) {
        let (schema, name) = split_table(table);
        (schema.unwrap_or(DEFAULT_SCHEMA), name)
    }
}

fn sample_sql(table: &str, limit: usize) -> String {
    format!(
        "SELECT row_to_json(t)::text FROM (SELECT * FROM {} LIMIT {}) AS t",
        quote_table(table),
        limit
    )
}

fn count_distinct_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT COUNT(DISTINCT {}) FROM {}",
        quote_identifier(column),
        quote_table(table)
    )
}

fn distinct_values_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT to_json(d.v)::text FROM (SELECT DISTINCT {col} AS v FROM {table} WHERE {col} IS NOT NULL) AS d ORDER BY d.v",
        col = quote_identifier(column),
        table = quote_table(table)
    )
}

/// Convert a JSON-encoded cell into a scalar.
///
/// Arrays, objects, and other composite values are kept as their JSON text.
fn scalar_from_json(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => n
                .as_f64()
                .map(Scalar::Float)
                .unwrap_or_else(|| Scalar::Text(n.to_string())),
        },
        Value::String(s) => Scalar::Text(s),
        other => Scalar::Text(other.to_string()),
    }
}

fn sample_from_json(text: &str) -> Result<SampleRow> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(text)?;
    Ok(object
        .into_iter()
        .map(|(name, value)| (name, scalar_from_json(value)))
        .collect())
}

impl DataSource for PostgresSource {
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>> {
        let (schema, name) = Self::resolve(table);
        let rows = self.fetch_all(COLUMNS_SQL, &[schema, name])?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(ColumnMetadata {
                name: row.try_get(0)?,
                declared_type: row.try_get(1)?,
                nullable: row.try_get(2)?,
                comment: row.try_get(3)?,
                primary_key: row.try_get(4)?,
            });
        }
        if columns.is_empty() {
            return Err(RosettaError::UnknownTable(table.to_string()));
        }
        debug!(table, columns = columns.len(), "read column metadata");
        Ok(columns)
    }

    fn get_table_comment(&self, table: &str) -> Result<Option<String>> {
        let (schema, name) = Self::resolve(table);
        let rows = self.fetch_all(TABLE_COMMENT_SQL, &[schema, name])?;
        match rows.first() {
            Some(row) => Ok(row.try_get(0)?),
            None => Ok(None),
        }
    }

    fn sample_rows(&self, table: &str, limit: usize) -> Result<Vec<SampleRow>> {
        let rows = self.fetch_all(&sample_sql(table, limit), &[])?;
        let mut samples = Vec::with_capacity(rows.len());
        for row in &rows {
            let text: String = row.try_get(0)?;
            samples.push(sample_from_json(&text)?);
        }
        debug!(table, rows = samples.len(), "sampled rows");
        Ok(samples)
    }

    fn count_distinct(&self, table: &str, column: &str) -> Result<u64> {
        let rows = self.fetch_all(&count_distinct_sql(table, column), &[])?;
        let count: i64 = match rows.first() {
            Some(row) => row.try_get(0)?,
            None => 0,
        };
        Ok(count.max(0) as u64)
    }

    fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<Scalar>> {
        let rows = self.fetch_all(&distinct_values_sql(table, column), &[])?;
        let mut values = Vec::with_capacity(rows.len());
        for row in &rows {
            let text: String = row.try_get(0)?;
            values.push(scalar_from_json(serde_json::from_str(&text)?));
        }
        Ok(values)
    }

    fn list_tables(&self) -> Result<Vec<TableRef>> {
        let rows = self.fetch_all(LIST_TABLES_SQL, &[])?;
        let mut tables = Vec::with_capacity(rows.len());
        for row in &rows {
            let column_count: i64 = row.try_get(2)?;
            tables.push(TableRef {
                schema: row.try_get(0)?,
                name: row.try_get(1)?,
                column_count: column_count.max(0) as usize,
            });
        }
        Ok(tables)
    }

    fn default_schema(&self) -> &str {
        DEFAULT_SCHEMA
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_sql_quotes_identifiers() {
        assert_eq!(
            sample_sql("public.users", 10),
            r#"SELECT row_to_json(t)::text FROM (SELECT * FROM "public"."users" LIMIT 10) AS t"#
        );
        assert_eq!(
            count_distinct_sql("users", r#"st"atus"#),
            r#"SELECT COUNT(DISTINCT "st""atus") FROM "users""#
        );
        let distinct = distinct_values_sql("users", "status");
        assert!(distinct.contains(r#"SELECT DISTINCT "status" AS v FROM "users" WHERE "status" IS NOT NULL"#));
        assert!(distinct.ends_with("ORDER BY d.v"));
    }

    #[test]
    fn test_resolve_defaults_to_public() {
        assert_eq!(PostgresSource::resolve("users"), ("public", "users"));
        assert_eq!(PostgresSource::resolve("billing.invoices"), ("billing", "invoices"));
    }

    #[test]
    fn test_scalar_from_json() {
        assert_eq!(scalar_from_json(Value::Null), Scalar::Null);
        assert_eq!(scalar_from_json(serde_json::json!(true)), Scalar::Bool(true));
        assert_eq!(scalar_from_json(serde_json::json!(42)), Scalar::Integer(42));
        assert_eq!(scalar_from_json(serde_json::json!(1.5)), Scalar::Float(1.5));
        assert_eq!(scalar_from_json(serde_json::json!("active")), Scalar::from("active"));
        assert_eq!(scalar_from_json(serde_json::json!(["a", "b"])), Scalar::from(r#"["a","b"]"#));
    }

    #[test]
    fn test_sample_row_keeps_column_order() {
        let row = sample_from_json(r#"{"id": 1, "email": "a@example.com", "score": null}"#).unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "email", "score"]);
        assert_eq!(row["email"], Scalar::from("a@example.com"));
        assert_eq!(row["score"], Scalar::Null);
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let err = PostgresSource::from_url("postgres://user@[bad/db").unwrap_err();
        assert!(matches!(err, RosettaError::Postgres(_)));
    }

    #[test]
    fn test_unreachable_server_is_data_source_error() {
        let err = PostgresSource::from_url("postgres://rosetta@127.0.0.1:1/app").unwrap_err();
        assert!(matches!(err, RosettaError::Postgres(_)));
        assert!(err.to_string().starts_with("Data source error"));
    }
}
