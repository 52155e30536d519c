//! Read-only repository rendering.

use std::fmt::{self, Write};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, RosettaError};
use crate::schema::{PrimitiveType, TableSpec};
use crate::source::{quote_identifier, quote_table};

use super::models::write_doc;
use super::naming::{plan_names, TableNaming};
use super::GENERATED_HEADER;

/// SQL verbs that must never appear in a generated statement.
pub const FORBIDDEN_SQL_TOKENS: &[&str] = &[
    "insert", "update", "delete", "drop", "alter", "create", "commit", "execute",
];

static QUOTED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(?:[^"]|"")*""#).unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// One statement embedded in a generated repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryQuery {
    /// Generated method name.
    pub method: String,
    /// Original column filtered on; `None` for `fetch_all`.
    pub filter_column: Option<String>,
    /// SQL text, with the filter bound as `?1`.
    pub sql: String,
}

fn select_clause(table: &TableSpec) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| quote_identifier(&c.original_name))
        .collect::<Vec<_>>()
        .join(", ");
    let columns = if columns.is_empty() {
        "*".to_string()
    } else {
        columns
    };
    format!("SELECT {} FROM {}", columns, quote_table(&table.table_name))
}

fn queries_with_fields(table: &TableSpec, fields: &[String]) -> Vec<RepositoryQuery> {
    let select = select_clause(table);

    let mut queries = vec![RepositoryQuery {
        method: "fetch_all".to_string(),
        filter_column: None,
        sql: select.clone(),
    }];
    for (column, field) in table.columns.iter().zip(fields) {
        queries.push(RepositoryQuery {
            method: format!("fetch_by_{}", field),
            filter_column: Some(column.original_name.clone()),
            sql: format!(
                "{} WHERE {} = ?1",
                select,
                quote_identifier(&column.original_name)
            ),
        });
    }
    queries
}

/// The exact statements a table's generated repository embeds.
pub fn repository_queries(table: &TableSpec) -> Vec<RepositoryQuery> {
    let fields = plan_names(std::slice::from_ref(table))
        .into_iter()
        .next()
        .map(|n| n.fields)
        .unwrap_or_default();
    queries_with_fields(table, &fields)
}

/// Reject any statement that is not a plain `SELECT`.
///
/// Quoted identifiers are ignored, so a column literally named `"update"`
/// does not trip the check.
pub fn assert_read_only(sql: &str) -> Result<()> {
    let unquoted = QUOTED_IDENTIFIER.replace_all(sql, " ");
    let words: Vec<String> = WORD
        .find_iter(&unquoted)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    if words.first().map(String::as_str) != Some("select") {
        return Err(RosettaError::Render(format!(
            "generated statement is not a SELECT: {}",
            sql
        )));
    }
    if let Some(word) = words
        .iter()
        .find(|w| FORBIDDEN_SQL_TOKENS.contains(&w.as_str()))
    {
        return Err(RosettaError::Render(format!(
            "generated statement contains forbidden token '{}': {}",
            word, sql
        )));
    }
    if unquoted.contains(';') {
        return Err(RosettaError::Render(format!(
            "generated statement contains a statement separator: {}",
            sql
        )));
    }
    Ok(())
}

fn param_type(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Int => "i64",
        PrimitiveType::Float => "f64",
        PrimitiveType::Bool => "bool",
        PrimitiveType::Str => "&str",
    }
}

/// Render one read-only repository per table.
///
/// Every statement is checked with [`assert_read_only`] before it is
/// emitted; a violation fails the whole render.
pub fn render_repositories(tables: &[TableSpec]) -> Result<String> {
    let names = plan_names(tables);

    let mut planned = Vec::with_capacity(tables.len());
    for (table, naming) in tables.iter().zip(&names) {
        let queries = queries_with_fields(table, &naming.fields);
        for query in &queries {
            assert_read_only(&query.sql)?;
        }
        planned.push((table, naming, queries));
    }

    let mut out = String::new();
    write_repositories(&mut out, &planned)
        .map_err(|e| RosettaError::Render(format!("failed to render repositories: {}", e)))?;
    Ok(out)
}

fn write_repositories(
    out: &mut String,
    planned: &[(&TableSpec, &TableNaming, Vec<RepositoryQuery>)],
) -> fmt::Result {
    writeln!(out, "{}", GENERATED_HEADER)?;
    writeln!(out)?;
    writeln!(out, "use rusqlite::{{params, Connection}};")?;
    writeln!(out)?;
    writeln!(out, "use super::_models::*;")?;

    for (table, naming, queries) in planned {
        writeln!(out)?;
        write_repository(out, table, naming, queries)?;
    }
    Ok(())
}

fn write_repository(
    out: &mut String,
    table: &TableSpec,
    naming: &TableNaming,
    queries: &[RepositoryQuery],
) -> fmt::Result {
    let repo = naming.repository_name();
    let model = &naming.type_name;

    write_doc(out, "", &format!("Read-only access to `{}`.", table.table_name))?;
    writeln!(out, "pub struct {}<'c> {{", repo)?;
    writeln!(out, "    conn: &'c Connection,")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl<'c> {}<'c> {{", repo)?;
    writeln!(out, "    pub fn new(conn: &'c Connection) -> Self {{")?;
    writeln!(out, "        Self {{ conn }}")?;
    writeln!(out, "    }}")?;

    for query in queries {
        writeln!(out)?;
        let column = query
            .filter_column
            .as_ref()
            .and_then(|name| table.columns.iter().find(|c| &c.original_name == name));
        match column {
            None => {
                writeln!(
                    out,
                    "    pub fn {}(&self) -> rusqlite::Result<Vec<{}>> {{",
                    query.method, model
                )?;
                writeln!(out, "        let mut stmt = self.conn.prepare({:?})?;", query.sql)?;
                writeln!(out, "        let rows = stmt.query_map([], {}::from_row)?;", model)?;
            }
            Some(column) => {
                writeln!(
                    out,
                    "    pub fn {}(&self, value: {}) -> rusqlite::Result<Vec<{}>> {{",
                    query.method,
                    param_type(column.primitive_type),
                    model
                )?;
                writeln!(out, "        let mut stmt = self.conn.prepare({:?})?;", query.sql)?;
                writeln!(
                    out,
                    "        let rows = stmt.query_map(params![value], {}::from_row)?;",
                    model
                )?;
            }
        }
        writeln!(out, "        rows.collect()")?;
        writeln!(out, "    }}")?;
    }

    writeln!(out, "}}")?;
    Ok(())
}
