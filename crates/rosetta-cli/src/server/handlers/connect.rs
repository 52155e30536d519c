//! Connection check and candidate table discovery.

use axum::Json;
use rosetta::discovery::discover_tables;
use serde::{Deserialize, Serialize};

use super::open_source;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub database_url: String,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub success: bool,
    pub tables: Vec<String>,
}

/// POST /api/connect
pub async fn connect(Json(req): Json<ConnectRequest>) -> Result<Json<ConnectResponse>, ApiError> {
    let tables = tokio::task::spawn_blocking(move || -> Result<Vec<String>, ApiError> {
        let source = open_source(&req.database_url)?;
        Ok(discover_tables(source.as_ref())?)
    })
    .await??;

    Ok(Json(ConnectResponse {
        success: true,
        tables,
    }))
}
