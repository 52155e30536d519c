//! Low-cardinality column detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::schema::Scalar;
use crate::source::DataSource;

/// Distinct-value count at or above which a column is not an enum.
pub const DEFAULT_ENUM_THRESHOLD: u64 = 20;

/// Declared types that can hold enumerations.
const ENUM_TYPES: &[&str] = &[
    "string",
    "str",
    "varchar",
    "text",
    "char",
    "character",
    "character varying",
    "int",
    "integer",
    "bigint",
    "smallint",
];

/// Outcome of enum detection for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum EnumResult {
    /// The declared type cannot hold an enumeration.
    NotApplicable,
    /// Too many distinct values.
    NotEnum,
    /// Sorted distinct values.
    Values(Vec<Scalar>),
}

impl EnumResult {
    /// The enumerated values, if this column is an enum.
    pub fn values(&self) -> Option<&[Scalar]> {
        match self {
            EnumResult::Values(values) => Some(values),
            _ => None,
        }
    }

    /// Whether this column is an enum.
    pub fn is_enum(&self) -> bool {
        matches!(self, EnumResult::Values(_))
    }
}

/// Normalize a declared type: trim, lowercase, drop a trailing `(n)` modifier.
fn normalize_type(declared_type: &str) -> String {
    let normalized = declared_type.trim().to_lowercase();
    match normalized.find('(') {
        Some(idx) if normalized.ends_with(')') => normalized[..idx].trim_end().to_string(),
        _ => normalized,
    }
}

/// Whether a declared type is eligible for enum detection.
pub fn is_enum_eligible(declared_type: &str) -> bool {
    ENUM_TYPES.contains(&normalize_type(declared_type).as_str())
}

/// Detect whether a column holds a small closed set of values.
///
/// Ineligible types return [`EnumResult::NotApplicable`] without querying
/// the source. Otherwise one count query is issued, plus a second query for
/// the values when the count is below `max_values`. Source errors propagate.
pub fn detect_enum_values(
    source: &dyn DataSource,
    table: &str,
    column: &str,
    declared_type: &str,
    max_values: u64,
) -> Result<EnumResult> {
    if !is_enum_eligible(declared_type) {
        return Ok(EnumResult::NotApplicable);
    }

    let count = source.count_distinct(table, column)?;
    if count >= max_values {
        debug!(table, column, count, "too many distinct values for an enum");
        return Ok(EnumResult::NotEnum);
    }

    let values = source.distinct_values(table, column)?;
    debug!(table, column, count, "detected enum");
    Ok(EnumResult::Values(values))
}
