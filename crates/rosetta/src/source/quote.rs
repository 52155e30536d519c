//! SQL identifier quoting.

/// Quote a single identifier with double quotes, doubling embedded quotes.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Split a table identifier on its first `.` into `(schema, table)`.
pub fn split_table(table: &str) -> (Option<&str>, &str) {
    match table.split_once('.') {
        Some((schema, name)) => (Some(schema), name),
        None => (None, table),
    }
}

/// Quote a possibly schema-qualified table identifier.
///
/// Each part is quoted independently and rejoined with `.`.
pub fn quote_table(table: &str) -> String {
    match split_table(table) {
        (Some(schema), name) => format!("{}.{}", quote_identifier(schema), quote_identifier(name)),
        (None, name) => quote_identifier(name),
    }
}
