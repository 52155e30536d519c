//! Column metadata as read from the source, and its enriched form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{PrimitiveType, Scalar};

/// One sampled row: column name to value, in the source's column order.
pub type SampleRow = IndexMap<String, Scalar>;

/// Column metadata as reported by the schema reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Declared SQL type, verbatim.
    pub declared_type: String,
    /// Column comment, where the source supports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnMetadata {
    /// Create metadata for a nullable, non-key column.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            comment: None,
            nullable: true,
            primary_key: false,
        }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column as a primary key (implies NOT NULL).
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

/// A column after enum detection and oracle inference have been merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedColumn {
    /// Name of the column in the database. Never rewritten.
    pub original_name: String,
    /// Coarse type derived from the declared type.
    pub primitive_type: PrimitiveType,
    /// Business-meaningful name; the original name unless the oracle offered one.
    pub semantic_name: String,
    /// Merged description from the oracle and enum detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether generated models should treat the column as optional.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl EnrichedColumn {
    /// Create an enriched column that carries only its original name.
    pub fn new(original_name: impl Into<String>, primitive_type: PrimitiveType) -> Self {
        let original_name = original_name.into();
        Self {
            semantic_name: original_name.clone(),
            original_name,
            primitive_type,
            description: None,
            nullable: true,
        }
    }

    /// Set the semantic name.
    pub fn with_semantic_name(mut self, name: impl Into<String>) -> Self {
        self.semantic_name = name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether the oracle renamed this column.
    pub fn is_renamed(&self) -> bool {
        self.semantic_name != self.original_name
    }
}
