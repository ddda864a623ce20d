//! Handlers for the `/history` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use snipforge_core::history::HistoryEntry;
use uuid::Uuid;

use crate::error::AppResult;
use crate::query::{PageParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/history
///
/// Paginated listing, newest first. Supports `page` and `per_page` query
/// parameters; out-of-range pages return an empty item list.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let page = state.service.history().list(page, per_page).await;
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Get / delete
// ---------------------------------------------------------------------------

/// GET /api/v1/history/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let entry = state.service.history().get(entry_id).await.ok_or(
        snipforge_core::error::CoreError::NotFound {
            entity: "History entry",
            id: entry_id,
        },
    )?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/history/{id}
///
/// Returns 204 on success, 404 when the entry does not exist.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.service.history().delete(entry_id).await?;
    tracing::info!(entry_id = %entry_id, "History entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Search results with their match count.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub items: Vec<HistoryEntry>,
    pub count: usize,
}

/// GET /api/v1/history/search?q=
///
/// Case-insensitive substring match across command, code, and explanation.
/// Unpaginated.
pub async fn search_history(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let items = state.service.history().search(&params.q).await;
    let count = items.len();
    Ok(Json(DataResponse {
        data: SearchResults { items, count },
    }))
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// GET /api/v1/history/stats
///
/// Entry counts grouped by model and by config.
pub async fn history_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = state.service.history().stats().await;
    Ok(Json(DataResponse { data: stats }))
}
