//! Merging enum detection and oracle inference into enriched columns.

use crate::analysis::EnumResult;
use crate::llm::ColumnInference;
use crate::schema::{ColumnMetadata, EnrichedColumn, PrimitiveType, Scalar};

/// Map a declared SQL type to a primitive type.
pub fn map_primitive_type(declared_type: &str) -> PrimitiveType {
    PrimitiveType::from_declared(declared_type)
}

/// Human-readable description of an enumeration.
pub fn enum_description(values: &[Scalar]) -> String {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Allowed values: {}", joined)
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Build the enriched form of a column.
///
/// The oracle's semantic name wins when it is non-blank. The oracle's
/// description comes first; enum values are appended after it.
pub fn merge_column(
    meta: &ColumnMetadata,
    enum_result: &EnumResult,
    inference: Option<&ColumnInference>,
) -> EnrichedColumn {
    let mut column = EnrichedColumn::new(&meta.name, map_primitive_type(&meta.declared_type))
        .with_nullable(meta.nullable);

    if let Some(name) = inference.and_then(|i| non_empty(i.semantic_name.as_ref())) {
        column = column.with_semantic_name(name);
    }

    let inferred = inference.and_then(|i| non_empty(i.description.as_ref()));
    let allowed = enum_result.values().map(enum_description);

    let description = match (inferred, allowed) {
        (Some(text), Some(values)) => Some(format!("{} {}", text, values)),
        (Some(text), None) => Some(text.to_string()),
        (None, Some(values)) => Some(values),
        (None, None) => None,
    };
    if let Some(description) = description {
        column = column.with_description(description);
    }

    column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inference(name: Option<&str>, description: Option<&str>) -> ColumnInference {
        ColumnInference {
            semantic_name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    fn statuses() -> EnumResult {
        EnumResult::Values(vec![Scalar::from("active"), Scalar::from("closed")])
    }

    #[test]
    fn test_enum_description() {
        assert_eq!(
            enum_description(&[Scalar::from("a"), Scalar::from("b"), Scalar::Integer(3)]),
            "Allowed values: a, b, 3"
        );
    }

    #[test]
    fn test_defaults_to_original_name() {
        let meta = ColumnMetadata::new("status", "varchar");
        let column = merge_column(&meta, &EnumResult::NotApplicable, None);

        assert_eq!(column.semantic_name, "status");
        assert_eq!(column.description, None);
        assert_eq!(column.primitive_type, PrimitiveType::Str);
        assert!(column.nullable);
    }

    #[test]
    fn test_blank_inferred_name_is_ignored() {
        let meta = ColumnMetadata::new("status", "varchar");
        let inferred = inference(Some("   "), None);
        let column = merge_column(&meta, &EnumResult::NotEnum, Some(&inferred));
        assert_eq!(column.semantic_name, "status");
    }

    #[test]
    fn test_inferred_then_enum_description() {
        let meta = ColumnMetadata::new("st", "varchar").not_null();
        let inferred = inference(Some("account_status"), Some("Lifecycle state."));
        let column = merge_column(&meta, &statuses(), Some(&inferred));

        assert_eq!(column.semantic_name, "account_status");
        assert_eq!(
            column.description.as_deref(),
            Some("Lifecycle state. Allowed values: active, closed")
        );
        assert!(!column.nullable);
    }

    #[test]
    fn test_enum_description_alone() {
        let meta = ColumnMetadata::new("status", "varchar");
        let column = merge_column(&meta, &statuses(), Some(&inference(None, Some(""))));
        assert_eq!(
            column.description.as_deref(),
            Some("Allowed values: active, closed")
        );
    }
}
