//! Rosetta: schema-semantics inference for relational databases.
//!
//! Rosetta reads a database's structure, samples a few rows, and asks a
//! language model what each column actually means. The answers are turned
//! into artifacts an agent can use safely: typed row models, read-only
//! repositories, a human-readable audit log, and function-calling schemas.
//!
//! # Core Principles
//!
//! - **Read-only**: Generated data access never writes
//! - **Private by default**: Values that look like personal data never leave the machine
//! - **Auditable**: Every inferred name is marked as such
//!
//! # Example
//!
//! ```no_run
//! use rosetta::llm::MockProvider;
//! use rosetta::{Pipeline, SqliteSource};
//!
//! let source = SqliteSource::open("app.db").unwrap();
//! let pipeline = Pipeline::new(source, MockProvider::new());
//! let report = pipeline.generate(&["users".to_string()]).unwrap();
//!
//! println!("{}", report.artifacts.audit_log);
//! ```

pub mod analysis;
pub mod codegen;
pub mod config;
pub mod discovery;
pub mod enrich;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod schema;
pub mod source;

pub use config::{RosettaMap, Settings};
pub use error::{Result, RosettaError};
pub use pipeline::{
    GeneratedArtifacts, GenerationReport, Pipeline, PipelineOptions, TableFailure, TableSummary,
};
pub use schema::{AuditRow, ColumnMetadata, EnrichedColumn, PrimitiveType, Scalar, TableSpec};
pub use source::{DataSource, MockSource, SqliteSource};
#[cfg(feature = "postgres")]
pub use source::PostgresSource;
