//! The column-semantics pipeline.
//!
//! For each table, in the order given: read columns, sample rows (when
//! enabled), detect enums and PII per column, build a scrubbed prompt, ask
//! the oracle, and merge its answer onto the column metadata. Once every
//! table has been visited the renderers run over the whole set.
//!
//! A table that fails (unknown table, query error, oracle unreachable) is
//! recorded in the report and skipped; the batch only fails when no table
//! could be processed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{
    detect_enum_values, detect_pii, fetch_sample_rows, samples_by_column, EnumResult,
    DEFAULT_ENUM_THRESHOLD, DEFAULT_SAMPLE_LIMIT,
};
use crate::codegen::{
    render_audit_log, render_function_manifest, render_models, render_repositories,
    write_generated_file, AUDIT_LOG_FILE, FUNCTIONS_FILE, MODELS_FILE, REPOS_FILE,
};
use crate::config::PrivacyConfig;
use crate::enrich::merge_column;
use crate::error::{Result, RosettaError};
use crate::llm::{
    build_user_prompt, compose_prompt, parse_inference_response, system_prompt, LlmProvider,
    PromptColumn,
};
use crate::schema::{AuditRow, TableSpec};
use crate::source::DataSource;

/// Knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Read example rows and include them in prompts.
    pub sample_rows: bool,
    /// Withhold values that look like personal data.
    pub scrub_pii: bool,
    /// Rows sampled per table.
    pub sample_limit: usize,
    /// Distinct-value count at or above which a column is not an enum.
    pub enum_threshold: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sample_rows: false,
            scrub_pii: true,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            enum_threshold: DEFAULT_ENUM_THRESHOLD,
        }
    }
}

impl From<&PrivacyConfig> for PipelineOptions {
    fn from(privacy: &PrivacyConfig) -> Self {
        Self {
            sample_rows: privacy.sample_rows,
            scrub_pii: privacy.scrub_pii,
            ..Self::default()
        }
    }
}

/// A table that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub error: String,
}

/// Inspection counts for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub column_count: usize,
    pub enum_count: usize,
    pub pii_count: usize,
}

/// The four rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub models: String,
    pub repos: String,
    pub audit_log: String,
    pub functions: String,
}

impl GeneratedArtifacts {
    /// Write all artifacts into `dir`, returning the paths written.
    pub fn write_to(&self, dir: impl AsRef<Path>, format: bool) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        Ok(vec![
            write_generated_file(dir.join(MODELS_FILE), &self.models, format)?,
            write_generated_file(dir.join(REPOS_FILE), &self.repos, format)?,
            write_generated_file(dir.join(AUDIT_LOG_FILE), &self.audit_log, false)?,
            write_generated_file(dir.join(FUNCTIONS_FILE), &self.functions, false)?,
        ])
    }
}

/// Outcome of [`Pipeline::generate`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub tables: Vec<TableSpec>,
    pub audit_rows: Vec<AuditRow>,
    pub failures: Vec<TableFailure>,
    pub artifacts: GeneratedArtifacts,
}

/// Runs the pipeline against one data source and one oracle.
pub struct Pipeline {
    source: Arc<dyn DataSource>,
    provider: Arc<dyn LlmProvider>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new(source: impl DataSource + 'static, provider: impl LlmProvider + 'static) -> Self {
        Self::from_parts(Arc::new(source), Arc::new(provider))
    }

    /// Create a pipeline from shared handles.
    pub fn from_parts(source: Arc<dyn DataSource>, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            source,
            provider,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Enrich a single table.
    pub fn process_table(&self, table: &str) -> Result<(TableSpec, Vec<AuditRow>)> {
        let source = self.source.as_ref();
        info!(table, source = source.name(), "processing table");

        let columns = source.get_columns(table)?;
        let comment = source.get_table_comment(table)?;
        let rows = if self.options.sample_rows {
            fetch_sample_rows(source, table, self.options.sample_limit)?
        } else {
            Vec::new()
        };
        let mut samples = samples_by_column(&rows);

        let mut prompt_columns = Vec::with_capacity(columns.len());
        let mut enum_results = Vec::with_capacity(columns.len());
        for column in &columns {
            let values = samples.swap_remove(&column.name).unwrap_or_default();
            let flagged = !values.is_empty() && detect_pii(&values);

            let mut enum_result = detect_enum_values(
                source,
                table,
                &column.name,
                &column.declared_type,
                self.options.enum_threshold,
            )?;
            if self.options.scrub_pii {
                let leaks = enum_result.values().is_some_and(detect_pii);
                if flagged || leaks {
                    debug!(table, column = %column.name, "withholding enum values from a PII column");
                    enum_result = EnumResult::NotEnum;
                }
            }

            prompt_columns.push(
                PromptColumn::new(&column.name, &column.declared_type)
                    .with_comment(column.comment.clone())
                    .with_samples(values),
            );
            enum_results.push(enum_result);
        }

        let user_prompt = build_user_prompt(
            table,
            &prompt_columns,
            self.options.scrub_pii,
            comment.as_deref(),
        )?;
        let prompt = compose_prompt(system_prompt(), &user_prompt);
        debug!(
            table,
            provider = self.provider.name(),
            prompt_chars = prompt.len(),
            "sending prompt"
        );

        let raw = self.provider.generate(&prompt)?;
        let inferences = parse_inference_response(&raw);
        if inferences.is_empty() {
            warn!(table, "oracle returned no usable column inferences");
        }

        let enriched = columns
            .iter()
            .zip(&enum_results)
            .map(|(column, enum_result)| {
                merge_column(column, enum_result, inferences.get(&column.name))
            })
            .collect();

        let spec = TableSpec::new(table, enriched);
        let audit_rows = spec.audit_rows();
        Ok((spec, audit_rows))
    }

    /// Process every table, then render all artifacts once.
    ///
    /// Fails with [`RosettaError::NoTablesProcessed`] only when tables were
    /// requested and none succeeded.
    pub fn generate(&self, tables: &[String]) -> Result<GenerationReport> {
        let mut specs = Vec::new();
        let mut audit_rows = Vec::new();
        let mut failures = Vec::new();

        for table in tables {
            match self.process_table(table) {
                Ok((spec, rows)) => {
                    specs.push(spec);
                    audit_rows.extend(rows);
                }
                Err(e) => {
                    warn!(table = %table, error = %e, "skipping table");
                    failures.push(TableFailure {
                        table: table.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if !tables.is_empty() && specs.is_empty() {
            return Err(RosettaError::NoTablesProcessed(failures));
        }

        let artifacts = GeneratedArtifacts {
            models: render_models(&specs)?,
            repos: render_repositories(&specs)?,
            audit_log: render_audit_log(&audit_rows, &failures),
            functions: render_function_manifest(&specs)?,
        };
        info!(
            processed = specs.len(),
            skipped = failures.len(),
            "generation complete"
        );

        Ok(GenerationReport {
            tables: specs,
            audit_rows,
            failures,
            artifacts,
        })
    }

    /// Column, enum, and PII counts for one table.
    ///
    /// PII is only counted when sampling is enabled.
    pub fn inspect_table(&self, table: &str) -> Result<TableSummary> {
        let source = self.source.as_ref();
        let columns = source.get_columns(table)?;
        let rows = if self.options.sample_rows {
            fetch_sample_rows(source, table, self.options.sample_limit)?
        } else {
            Vec::new()
        };
        let samples = samples_by_column(&rows);

        let mut enum_count = 0;
        let mut pii_count = 0;
        for column in &columns {
            let result = detect_enum_values(
                source,
                table,
                &column.name,
                &column.declared_type,
                self.options.enum_threshold,
            )?;
            if result.is_enum() {
                enum_count += 1;
            }
            if let Some(values) = samples.get(&column.name) {
                if !values.is_empty() && detect_pii(values) {
                    pii_count += 1;
                }
            }
        }

        Ok(TableSummary {
            name: table.to_string(),
            column_count: columns.len(),
            enum_count,
            pii_count,
        })
    }

    /// Inspect each table independently.
    pub fn inspect(&self, tables: &[String]) -> Vec<(String, Result<TableSummary>)> {
        tables
            .iter()
            .map(|table| (table.clone(), self.inspect_table(table)))
            .collect()
    }
}
