//! Rust model rendering.

use std::fmt::{self, Write};

use crate::error::{Result, RosettaError};
use crate::schema::{EnrichedColumn, TableSpec};

use super::naming::{plan_names, TableNaming};
use super::GENERATED_HEADER;

/// Render one serde model struct per table.
///
/// Fields carry `#[serde(rename)]` back to the real column whenever the
/// field name differs from it or the column has a description, so
/// (de)serialization and `from_row` always address the database name.
pub fn render_models(tables: &[TableSpec]) -> Result<String> {
    let mut out = String::new();
    write_models(&mut out, tables, &plan_names(tables))
        .map_err(|e| RosettaError::Render(format!("failed to render models: {}", e)))?;
    Ok(out)
}

fn write_models(out: &mut String, tables: &[TableSpec], names: &[TableNaming]) -> fmt::Result {
    writeln!(out, "{}", GENERATED_HEADER)?;
    writeln!(out)?;
    writeln!(out, "use serde::{{Deserialize, Serialize}};")?;

    for (table, naming) in tables.iter().zip(names) {
        writeln!(out)?;
        write_model(out, table, naming)?;
    }
    Ok(())
}

fn field_type(column: &EnrichedColumn) -> String {
    let base = column.primitive_type.rust_type();
    if column.nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

pub(super) fn write_doc(out: &mut String, indent: &str, text: &str) -> fmt::Result {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(out, "{}///", indent)?;
        } else {
            writeln!(out, "{}/// {}", indent, line)?;
        }
    }
    Ok(())
}

fn write_model(out: &mut String, table: &TableSpec, naming: &TableNaming) -> fmt::Result {
    write_doc(out, "", &format!("Row of `{}`.", table.table_name))?;
    writeln!(
        out,
        "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"
    )?;
    writeln!(out, "pub struct {} {{", naming.type_name)?;
    for (column, field) in table.columns.iter().zip(&naming.fields) {
        if let Some(description) = &column.description {
            write_doc(out, "    ", description)?;
        }
        if field != &column.original_name || column.description.is_some() {
            writeln!(out, "    #[serde(rename = {:?})]", column.original_name)?;
        }
        writeln!(out, "    pub {}: {},", field, field_type(column))?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let column_list = table
        .columns
        .iter()
        .map(|c| format!("{:?}", c.original_name))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "impl {} {{", naming.type_name)?;
    writeln!(out, "    pub const TABLE: &'static str = {:?};", table.table_name)?;
    writeln!(
        out,
        "    pub const COLUMNS: &'static [&'static str] = &[{}];",
        column_list
    )?;
    writeln!(out)?;

    let row_arg = if table.columns.is_empty() { "_row" } else { "row" };
    writeln!(
        out,
        "    pub fn from_row({}: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {{",
        row_arg
    )?;
    writeln!(out, "        Ok(Self {{")?;
    for (column, field) in table.columns.iter().zip(&naming.fields) {
        writeln!(out, "            {}: row.get({:?})?,", field, column.original_name)?;
    }
    writeln!(out, "        }})")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}
