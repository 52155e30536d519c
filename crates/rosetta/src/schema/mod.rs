//! Schema types: source metadata, sampled values, and enriched tables.

mod column;
mod table;
mod types;

pub use column::{ColumnMetadata, EnrichedColumn, SampleRow};
pub use table::{AuditRow, INFERRED_MARKER, TableSpec};
pub use types::{PrimitiveType, Scalar};
