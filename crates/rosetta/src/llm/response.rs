//! Interpretation of oracle output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// What the oracle proposed for a single column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Inferences keyed by original column name.
pub type InferenceOutcome = IndexMap<String, ColumnInference>;

/// Remove a surrounding markdown code fence, if any.
fn strip_code_fence(response: &str) -> &str {
    if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(response)
    } else if response.contains("```") {
        response
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(response)
    } else {
        response.trim()
    }
}

/// Parse raw oracle text into per-column inferences.
///
/// Never fails. Unparseable text, a non-object root, or a missing `columns`
/// list yield an empty outcome. Entries without a string `name` are skipped,
/// non-string fields are dropped one by one, and entries left with nothing
/// are omitted.
pub fn parse_inference_response(raw: &str) -> InferenceOutcome {
    let mut outcome = InferenceOutcome::new();

    // Bare JSON is taken as-is; backticks inside its strings are not fences.
    let parsed = serde_json::from_str::<Value>(raw.trim())
        .or_else(|_| serde_json::from_str::<Value>(strip_code_fence(raw)));
    let payload = match parsed {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "oracle response is not JSON");
            return outcome;
        }
    };

    let Some(columns) = payload.get("columns").and_then(Value::as_array) else {
        debug!("oracle response has no columns list");
        return outcome;
    };

    for entry in columns {
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            continue;
        };
        let inference = ColumnInference {
            semantic_name: entry
                .get("semantic_name")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: entry
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        if inference.semantic_name.is_some() || inference.description.is_some() {
            outcome.insert(name.to_string(), inference);
        }
    }

    outcome
}
