//! Function-calling manifest rendering.

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::schema::TableSpec;

use super::naming::function_suffix;

/// One function schema per table, in input order.
pub fn render_function_schemas(tables: &[TableSpec]) -> Vec<Value> {
    tables
        .iter()
        .map(|table| {
            let mut properties = Map::new();
            for column in &table.columns {
                let mut property = Map::new();
                property.insert(
                    "type".to_string(),
                    Value::from(column.primitive_type.json_type()),
                );
                if let Some(description) = &column.description {
                    property.insert("description".to_string(), Value::from(description.as_str()));
                }
                properties.insert(column.original_name.clone(), Value::Object(property));
            }

            json!({
                "name": format!("get_{}", function_suffix(&table.table_name)),
                "description": format!("Fetch rows from {}", table.table_name),
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": [],
                    "additionalProperties": false
                }
            })
        })
        .collect()
}

/// The manifest as pretty-printed JSON.
pub fn render_function_manifest(tables: &[TableSpec]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&render_function_schemas(tables))?)
}
