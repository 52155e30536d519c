//! Row sampling.

use indexmap::IndexMap;

use crate::error::Result;
use crate::schema::{SampleRow, Scalar};
use crate::source::DataSource;

/// Default number of rows sampled per table.
pub const DEFAULT_SAMPLE_LIMIT: usize = 3;

/// Fetch up to `limit` example rows from a table.
///
/// Rows come back in the source's default order; no ordering is imposed.
pub fn fetch_sample_rows(
    source: &dyn DataSource,
    table: &str,
    limit: usize,
) -> Result<Vec<SampleRow>> {
    source.sample_rows(table, limit)
}

/// Pivot sampled rows into per-column value lists.
pub fn samples_by_column(rows: &[SampleRow]) -> IndexMap<String, Vec<Scalar>> {
    let mut by_column: IndexMap<String, Vec<Scalar>> = IndexMap::new();
    for row in rows {
        for (name, value) in row {
            by_column.entry(name.clone()).or_default().push(value.clone());
        }
    }
    by_column
}
