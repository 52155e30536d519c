//! Identifier derivation for generated code.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::TableSpec;

static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]+").unwrap());
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Words that cannot be used as bare field or method names.
///
/// Strict and reserved Rust keywords, plus SQL write verbs so that no
/// generated accessor is ever named after one.
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield", "union",
    // SQL write verbs
    "insert", "update", "delete", "drop", "alter", "create", "commit", "execute",
];

/// Type names the generated files already use: prelude items they name and
/// everything they import. A model with one of these names gets a `Row`
/// suffix, as does any name ending in `Repository`.
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "Self",
    "Option",
    "Some",
    "None",
    "Result",
    "Ok",
    "Err",
    "String",
    "Vec",
    "Box",
    "Serialize",
    "Deserialize",
    "Connection",
];

/// Replace non-identifier runs with `_`, collapse repeats, trim, lowercase.
fn sanitize(value: &str) -> String {
    let replaced = NON_IDENTIFIER.replace_all(value.trim(), "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_lowercase()
}

fn starts_with_digit(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Pascal-case a table name into a struct name.
///
/// The whole name is used, so `public.users` becomes `PublicUsers`.
pub fn type_name(table_name: &str) -> String {
    let pascal: String = sanitize(table_name)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    let name = if pascal.is_empty() {
        "Model".to_string()
    } else if starts_with_digit(&pascal) {
        format!("Table{}", pascal)
    } else {
        pascal
    };

    if RESERVED_TYPE_NAMES.contains(&name.as_str()) || name.ends_with("Repository") {
        format!("{}Row", name)
    } else {
        name
    }
}

/// Snake-case a semantic name into a field identifier.
pub fn field_name(semantic_name: &str) -> String {
    let snake = sanitize(semantic_name);
    if snake.is_empty() {
        "field".to_string()
    } else if starts_with_digit(&snake) {
        format!("field_{}", snake)
    } else if RESERVED.contains(&snake.as_str()) {
        format!("{}_", snake)
    } else {
        snake
    }
}

/// Snake-case of the last path segment, used for function names.
pub fn function_suffix(table_name: &str) -> String {
    let last = table_name.rsplit('.').next().unwrap_or(table_name);
    let snake = sanitize(last);
    if snake.is_empty() {
        "table".to_string()
    } else {
        snake
    }
}

/// Append `2`, `3`, ... (after `sep`) to names already taken.
fn dedupe(names: impl IntoIterator<Item = String>, sep: &str) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut unique = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}{}{}", name, sep, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

/// Identifiers for one table, shared by the model and repository renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNaming {
    pub type_name: String,
    /// One field name per column, in column order.
    pub fields: Vec<String>,
}

impl TableNaming {
    pub fn repository_name(&self) -> String {
        format!("{}Repository", self.type_name)
    }
}

/// Derive unique type and field names for a set of tables.
pub fn plan_names(tables: &[TableSpec]) -> Vec<TableNaming> {
    let type_names = dedupe(tables.iter().map(|t| type_name(&t.table_name)), "");

    tables
        .iter()
        .zip(type_names)
        .map(|(table, type_name)| TableNaming {
            type_name,
            fields: dedupe(
                table.columns.iter().map(|c| field_name(&c.semantic_name)),
                "_",
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnrichedColumn, PrimitiveType};

    #[test]
    fn test_type_name() {
        assert_eq!(type_name("users"), "Users");
        assert_eq!(type_name("public.users"), "PublicUsers");
        assert_eq!(type_name("order-items"), "OrderItems");
        assert_eq!(type_name("USER__ACCOUNTS"), "UserAccounts");
        assert_eq!(type_name("2024_sales"), "Table2024Sales");
        assert_eq!(type_name("!!!"), "Model");
        assert_eq!(type_name("self"), "SelfRow");
        assert_eq!(type_name(""), "Model");
    }

    #[test]
    fn test_type_name_avoids_names_the_output_uses() {
        assert_eq!(type_name("option"), "OptionRow");
        assert_eq!(type_name("string"), "StringRow");
        assert_eq!(type_name("vec"), "VecRow");
        assert_eq!(type_name("serialize"), "SerializeRow");
        assert_eq!(type_name("deserialize"), "DeserializeRow");
        assert_eq!(type_name("connection"), "ConnectionRow");
        assert_eq!(type_name("result"), "ResultRow");
        assert_eq!(type_name("users_repository"), "UsersRepositoryRow");
        assert_eq!(type_name("2024_repository"), "Table2024RepositoryRow");
        // only exact matches are renamed
        assert_eq!(type_name("connections"), "Connections");
        assert_eq!(type_name("option_sets"), "OptionSets");
    }

    #[test]
    fn test_model_never_collides_with_a_repository() {
        let tables = vec![
            TableSpec::new("users", vec![]),
            TableSpec::new("users_repository", vec![]),
        ];
        let plan = plan_names(&tables);

        assert_eq!(plan[0].repository_name(), "UsersRepository");
        assert_eq!(plan[1].type_name, "UsersRepositoryRow");
        assert_ne!(plan[1].type_name, plan[0].repository_name());
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("User ID"), "user_id");
        assert_eq!(field_name("customerNumber"), "customernumber");
        assert_eq!(field_name("1st_login"), "field_1st_login");
        assert_eq!(field_name("type"), "type_");
        assert_eq!(field_name("delete"), "delete_");
        assert_eq!(field_name("--"), "field");
    }

    #[test]
    fn test_function_suffix() {
        assert_eq!(function_suffix("public.users"), "users");
        assert_eq!(function_suffix("Order Items"), "order_items");
        assert_eq!(function_suffix("public."), "table");
    }

    #[test]
    fn test_plan_names_dedupes() {
        let tables = vec![
            TableSpec::new(
                "users",
                vec![
                    EnrichedColumn::new("a", PrimitiveType::Str).with_semantic_name("name"),
                    EnrichedColumn::new("b", PrimitiveType::Str).with_semantic_name("Name"),
                    EnrichedColumn::new("c", PrimitiveType::Str).with_semantic_name("name_2"),
                ],
            ),
            TableSpec::new("Users", vec![]),
        ];
        let plan = plan_names(&tables);

        assert_eq!(plan[0].type_name, "Users");
        assert_eq!(plan[1].type_name, "Users2");
        assert_eq!(plan[0].fields, vec!["name", "name_2", "name_2_2"]);
        assert_eq!(plan[0].repository_name(), "UsersRepository");
    }
}
