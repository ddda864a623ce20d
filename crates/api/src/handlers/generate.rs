//! Handlers for the synchronous generation path.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use snipforge_core::types::{GenerateRequest, Snippet};

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body shared by both dispatch paths.
///
/// `model` and `config` are optional; absent values fall back to the
/// server's configured defaults.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub command: String,
    pub model: Option<String>,
    pub config: Option<String>,
}

impl GenerateBody {
    /// Apply server defaults and produce the core request.
    pub fn into_request(self, config: &ServerConfig) -> GenerateRequest {
        GenerateRequest {
            command: self.command,
            model: self.model.unwrap_or_else(|| config.default_model.clone()),
            config: self.config.unwrap_or_else(|| config.default_config.clone()),
        }
    }
}

/// Response payload for the synchronous path.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub code: String,
    pub explanation: String,
    pub model: String,
    pub config: String,
}

/// POST /api/v1/generate
///
/// Resolve a command synchronously (cache-or-generate), append the result
/// to history, and return the pair. Generation failures surface as 502.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> AppResult<impl IntoResponse> {
    let request = body.into_request(&state.config);
    let model = request.model.clone();
    let config = request.config.clone();

    let Snippet { code, explanation } = state.service.generate_sync(request).await?;

    Ok(Json(DataResponse {
        data: GenerateResponse {
            code,
            explanation,
            model,
            config,
        },
    }))
}
