//! Column analysis: sampling, enumeration detection, and PII detection.

mod enums;
mod pii;
mod sampler;

pub use enums::{detect_enum_values, is_enum_eligible, EnumResult, DEFAULT_ENUM_THRESHOLD};
pub use pii::detect_pii;
pub use sampler::{fetch_sample_rows, samples_by_column, DEFAULT_SAMPLE_LIMIT};
