//! Prompt templates for schema inference.

use serde::Serialize;

use crate::analysis::detect_pii;
use crate::error::Result;
use crate::schema::Scalar;

/// Lead-in line placed before the JSON payload of every user prompt.
const USER_PROMPT_LEAD: &str =
    "Use the following schema context to infer semantic names and descriptions.\n";

/// One column as presented to the oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    pub comment: Option<String>,
    pub samples: Vec<Scalar>,
}

impl PromptColumn {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            comment: None,
            samples: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_samples(mut self, samples: Vec<Scalar>) -> Self {
        self.samples = samples;
        self
    }
}

#[derive(Serialize)]
struct PromptPayload<'a> {
    table: &'a str,
    table_comment: Option<&'a str>,
    columns: Vec<PromptColumn>,
}

/// System prompt for all schema inference calls.
pub fn system_prompt() -> &'static str {
    concat!(
        "You are a Data Architect. Given a database table and columns, ",
        "infer business meaning, propose clear semantic names, and describe intent. ",
        "Return STRICT JSON only, with this shape:\n",
        r#"{ "columns": [ { "name": "...", "semantic_name": "...", "description": "..." } ] }"#
    )
}

/// Build the user prompt describing one table.
///
/// With `scrub_pii` on, a column whose samples look like personal data is
/// sent with an empty sample list. Other samples are passed verbatim.
pub fn build_user_prompt(
    table: &str,
    columns: &[PromptColumn],
    scrub_pii: bool,
    table_comment: Option<&str>,
) -> Result<String> {
    let columns = columns
        .iter()
        .map(|column| {
            let mut column = column.clone();
            if scrub_pii && detect_pii(&column.samples) {
                column.samples.clear();
            }
            column
        })
        .collect();

    let payload = PromptPayload {
        table,
        table_comment,
        columns,
    };

    Ok(format!(
        "{}{}",
        USER_PROMPT_LEAD,
        serde_json::to_string_pretty(&payload)?
    ))
}

/// Join the system and user prompts into the single text sent to the oracle.
pub fn compose_prompt(system: &str, user: &str) -> String {
    format!("{}\n\n{}", system, user)
}
