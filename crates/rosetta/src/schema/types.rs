//! Core type definitions for schema representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse primitive type derived from a column's declared SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "str")]
    Str,
}

impl PrimitiveType {
    /// Derive the primitive type from a declared column type.
    ///
    /// Substring checks run in priority order, so `bigint` and `smallint`
    /// land on [`PrimitiveType::Int`] and anything unrecognized is a string.
    pub fn from_declared(declared_type: &str) -> Self {
        let normalized = declared_type.trim().to_lowercase();
        if normalized.contains("int") {
            PrimitiveType::Int
        } else if normalized.contains("bool") {
            PrimitiveType::Bool
        } else if ["numeric", "decimal", "real", "float", "double"]
            .iter()
            .any(|token| normalized.contains(token))
        {
            PrimitiveType::Float
        } else {
            PrimitiveType::Str
        }
    }

    /// JSON Schema type used in function-call manifests.
    pub fn json_type(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "integer",
            PrimitiveType::Float => "number",
            PrimitiveType::Bool => "boolean",
            PrimitiveType::Str => "string",
        }
    }

    /// Rust type used in generated models.
    pub fn rust_type(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "i64",
            PrimitiveType::Float => "f64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Str => "String",
        }
    }
}

impl Default for PrimitiveType {
    fn default() -> Self {
        PrimitiveType::Str
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Int => write!(f, "int"),
            PrimitiveType::Bool => write!(f, "bool"),
            PrimitiveType::Float => write!(f, "float"),
            PrimitiveType::Str => write!(f, "str"),
        }
    }
}

/// A single cell value read from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}
