//! Choosing which tables to offer for a quick demo run.

use crate::error::Result;
use crate::source::{DataSource, TableRef};

/// Most tables offered by [`candidate_tables`].
pub const CANDIDATE_LIMIT: usize = 12;

/// Fewest columns a candidate table may have.
pub const MIN_CANDIDATE_COLUMNS: usize = 3;

const SYSTEM_PREFIXES: &[&str] = &["pg_", "sql_", "sqlite_"];

const BLOCKLIST_TOKENS: &[&str] = &[
    "tmp",
    "temp",
    "backup",
    "archive",
    "staging",
    "migrate",
    "migration",
    "schema_migrations",
    "seed",
    "test",
    "dev",
    "internal",
    "system",
];

fn is_candidate(table: &TableRef, default_schema: &str) -> bool {
    if table.schema != default_schema {
        return false;
    }
    let lowered = table.name.to_lowercase();
    if SYSTEM_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return false;
    }
    if BLOCKLIST_TOKENS.iter().any(|t| lowered.contains(t)) {
        return false;
    }
    table.column_count >= MIN_CANDIDATE_COLUMNS
}

/// Pick the most interesting tables in the default schema.
///
/// Housekeeping tables are skipped, wider tables come first (ties broken by
/// name), and at most [`CANDIDATE_LIMIT`] qualified names are returned.
pub fn candidate_tables(tables: &[TableRef], default_schema: &str) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = tables
        .iter()
        .filter(|t| is_candidate(t, default_schema))
        .map(|t| (t.qualified_name(), t.column_count))
        .collect();

    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    candidates
        .into_iter()
        .take(CANDIDATE_LIMIT)
        .map(|(name, _)| name)
        .collect()
}

/// List a source's tables and pick the candidates.
pub fn discover_tables(source: &dyn DataSource) -> Result<Vec<String>> {
    let tables = source.list_tables()?;
    Ok(candidate_tables(&tables, source.default_schema()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnMetadata;
    use crate::source::MockSource;

    fn table(schema: &str, name: &str, column_count: usize) -> TableRef {
        TableRef {
            schema: schema.to_string(),
            name: name.to_string(),
            column_count,
        }
    }

    #[test]
    fn test_filters_housekeeping_tables() {
        let tables = vec![
            table("main", "customers", 5),
            table("main", "pg_stat", 9),
            table("main", "sqlite_sequence", 4),
            table("main", "orders_backup", 8),
            table("main", "Test_Users", 6),
            table("main", "narrow", 2),
            table("other", "invoices", 7),
        ];
        assert_eq!(candidate_tables(&tables, "main"), vec!["main.customers"]);
    }

    #[test]
    fn test_sorted_by_width_then_name() {
        let tables = vec![
            table("public", "b_orders", 4),
            table("public", "a_orders", 4),
            table("public", "customers", 9),
        ];
        assert_eq!(
            candidate_tables(&tables, "public"),
            vec!["public.customers", "public.a_orders", "public.b_orders"]
        );
    }

    #[test]
    fn test_limit() {
        let tables: Vec<TableRef> = (0..20)
            .map(|i| table("main", &format!("t{:02}", i), 3 + i))
            .collect();
        let picked = candidate_tables(&tables, "main");
        assert_eq!(picked.len(), CANDIDATE_LIMIT);
        assert_eq!(picked[0], "main.t19");
    }

    #[test]
    fn test_discover_from_source() {
        let columns = vec![
            ColumnMetadata::new("id", "integer"),
            ColumnMetadata::new("name", "text"),
            ColumnMetadata::new("email", "text"),
        ];
        let source = MockSource::new()
            .with_table("accounts", columns.clone())
            .with_table("tmp_accounts", columns);
        assert_eq!(discover_tables(&source).unwrap(), vec!["main.accounts"]);
    }
}
