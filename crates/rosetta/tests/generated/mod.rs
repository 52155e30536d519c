//! Renderer output for the tables in `generated_code_test.rs`.
//!
//! Regenerate with `render_models` / `render_repositories` when the
//! renderers change; `test_fixture_matches_renderer_output` fails until then.

pub mod _models;
pub mod _repos;
