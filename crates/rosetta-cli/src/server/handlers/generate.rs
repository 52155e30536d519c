//! Artifact generation.

use std::sync::Arc;

use axum::{extract::State, Json};
use rosetta::llm::{create_provider, LlmConfig, ProviderKind};
use rosetta::{GeneratedArtifacts, Pipeline, PipelineOptions, Settings, TableFailure};
use serde::{Deserialize, Serialize};

use super::open_source;
use crate::server::error::ApiError;
use crate::server::state::AppState;

fn default_true() -> bool {
    true
}

/// A non-blank key from the request wins; otherwise the process settings.
fn resolve_api_key<'a>(
    requested: Option<&'a str>,
    settings: &'a Settings,
    provider: ProviderKind,
) -> Option<&'a str> {
    requested
        .filter(|key| !key.trim().is_empty())
        .or_else(|| settings.api_key_for(provider))
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub database_url: String,
    #[serde(default, alias = "gemini_api_key")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub tables: Vec<String>,
    /// Defaults to the provider's model when absent or blank.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_true")]
    pub sample_rows: bool,
    #[serde(default = "default_true")]
    pub scrub_pii: bool,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub outputs: GeneratedArtifacts,
    pub failed_tables: Vec<TableFailure>,
}

/// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if req.tables.is_empty() {
        return Err(ApiError::BadRequest("select at least one table".to_string()));
    }

    let response = tokio::task::spawn_blocking(move || -> Result<GenerateResponse, ApiError> {
        let api_key = resolve_api_key(req.api_key.as_deref(), &state.settings, req.provider);
        let model = req
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| req.provider.default_model());
        let config = LlmConfig {
            model: model.to_string(),
            ..LlmConfig::default()
        };
        let provider = create_provider(req.provider, config, api_key)?;
        let source = open_source(&req.database_url)?;

        let options = PipelineOptions {
            sample_rows: req.sample_rows,
            scrub_pii: req.scrub_pii,
            ..PipelineOptions::default()
        };
        let report = Pipeline::from_parts(source, Arc::from(provider))
            .with_options(options)
            .generate(&req.tables)?;

        Ok(GenerateResponse {
            success: true,
            outputs: report.artifacts,
            failed_tables: report.failures,
        })
    })
    .await??;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key_wins() {
        let settings = Settings::default().with_gemini_api_key("from-env");
        assert_eq!(
            resolve_api_key(Some("from-request"), &settings, ProviderKind::Gemini),
            Some("from-request")
        );
    }

    #[test]
    fn test_blank_request_key_falls_back_to_settings() {
        let settings = Settings::default().with_gemini_api_key("from-env");
        assert_eq!(
            resolve_api_key(Some(""), &settings, ProviderKind::Gemini),
            Some("from-env")
        );
        assert_eq!(
            resolve_api_key(Some("   "), &settings, ProviderKind::Gemini),
            Some("from-env")
        );
        assert_eq!(resolve_api_key(None, &settings, ProviderKind::Gemini), Some("from-env"));
        assert_eq!(resolve_api_key(Some(""), &Settings::default(), ProviderKind::Gemini), None);
    }
}
