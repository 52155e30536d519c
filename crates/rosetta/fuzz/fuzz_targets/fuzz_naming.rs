//! Fuzz target for identifier derivation and read-only SQL.
//!
//! Any table or column name a database can hold must produce valid
//! identifiers and statements that pass the read-only check.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rosetta::codegen::naming::{field_name, function_suffix, type_name};
use rosetta::codegen::{assert_read_only, repository_queries};
use rosetta::{EnrichedColumn, PrimitiveType, TableSpec};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (table, column) = text.split_once('\n').unwrap_or((&text, "c"));

    assert!(!type_name(table).is_empty());
    assert!(!field_name(column).is_empty());
    assert!(!function_suffix(table).is_empty());

    let spec = TableSpec::new(table, vec![EnrichedColumn::new(column, PrimitiveType::Str)]);
    for query in repository_queries(&spec) {
        assert!(assert_read_only(&query.sql).is_ok(), "{}", query.sql);
    }
});
