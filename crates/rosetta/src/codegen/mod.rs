//! Artifact rendering.
//!
//! Every renderer is a pure function of the enriched [`TableSpec`]s (plus
//! audit rows and failures for the log). Nothing here touches the data
//! source or the oracle.
//!
//! | Artifact | Renderer |
//! |---|---|
//! | `_models.rs` | [`render_models`] |
//! | `_repos.rs` | [`render_repositories`] |
//! | `audit_log.md` | [`render_audit_log`] |
//! | `functions.json` | [`render_function_manifest`] |
//!
//! [`TableSpec`]: crate::schema::TableSpec

mod audit;
mod functions;
mod models;
pub mod naming;
mod repos;
mod writer;

pub use audit::render_audit_log;
pub use functions::{render_function_manifest, render_function_schemas};
pub use models::render_models;
pub use repos::{
    assert_read_only, render_repositories, repository_queries, RepositoryQuery,
    FORBIDDEN_SQL_TOKENS,
};
pub use writer::write_generated_file;

/// First line of every generated Rust file.
pub const GENERATED_HEADER: &str = "// @generated by rosetta. Do not edit by hand.";

/// File name of the rendered models.
pub const MODELS_FILE: &str = "_models.rs";
/// File name of the rendered repositories.
pub const REPOS_FILE: &str = "_repos.rs";
/// File name of the audit log.
pub const AUDIT_LOG_FILE: &str = "audit_log.md";
/// File name of the function-calling manifest.
pub const FUNCTIONS_FILE: &str = "functions.json";
