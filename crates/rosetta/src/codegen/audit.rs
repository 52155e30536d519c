//! Markdown audit log rendering.

use crate::pipeline::TableFailure;
use crate::schema::AuditRow;

const HEADER: &str = "| Table | Original Column | Inferred Meaning |";
const SEPARATOR: &str = "| --- | --- | --- |";

/// Make a value safe for a single markdown table cell.
fn cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

fn meaning(row: &AuditRow) -> String {
    match &row.description {
        Some(description) => format!("{}: {}", row.display_label, description),
        None => row.display_label.clone(),
    }
}

/// Render the audit log: one table row per processed column, then the
/// tables that were skipped, if any.
pub fn render_audit_log(rows: &[AuditRow], skipped: &[TableFailure]) -> String {
    let mut lines = vec![HEADER.to_string(), SEPARATOR.to_string()];
    for row in rows {
        lines.push(format!(
            "| {} | {} | {} |",
            cell(&row.table_name),
            cell(&row.original_name),
            cell(&meaning(row))
        ));
    }

    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("## Skipped tables".to_string());
        lines.push(String::new());
        for failure in skipped {
            lines.push(format!("- {}: {}", failure.table, cell(&failure.error)));
        }
    }

    lines.join("\n") + "\n"
}
