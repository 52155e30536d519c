//! Fuzz target for oracle response parsing.
//!
//! The oracle's answer is untrusted text. Parsing must never panic, and
//! whatever it returns must survive being merged into a table.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rosetta::llm::parse_inference_response;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let parsed = parse_inference_response(&raw);

    for (name, inference) in &parsed {
        let _ = name.len();
        let _ = inference.semantic_name.as_deref();
        let _ = inference.description.as_deref();
    }
});
