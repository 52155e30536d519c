//! Per-table inspection.

use std::sync::Arc;

use axum::Json;
use rosetta::llm::MockProvider;
use rosetta::{Pipeline, PipelineOptions, TableFailure, TableSummary};
use serde::{Deserialize, Serialize};

use super::open_source;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct InspectRequest {
    pub database_url: String,
    #[serde(default)]
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct InspectResponse {
    pub success: bool,
    pub tables: Vec<TableSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_tables: Vec<TableFailure>,
}

/// POST /api/inspect
///
/// Always samples rows, so PII counts are reported.
pub async fn inspect_tables(
    Json(req): Json<InspectRequest>,
) -> Result<Json<InspectResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || -> Result<InspectResponse, ApiError> {
        let source = open_source(&req.database_url)?;
        let options = PipelineOptions {
            sample_rows: true,
            ..PipelineOptions::default()
        };
        let pipeline = Pipeline::from_parts(source, Arc::new(MockProvider::new())).with_options(options);

        let mut tables = Vec::new();
        let mut failed_tables = Vec::new();
        for (table, result) in pipeline.inspect(&req.tables) {
            match result {
                Ok(summary) => tables.push(summary),
                Err(e) => failed_tables.push(TableFailure {
                    table,
                    error: e.to_string(),
                }),
            }
        }

        Ok(InspectResponse {
            success: true,
            tables,
            failed_tables,
        })
    })
    .await??;

    Ok(Json(response))
}
