pub mod generate;
pub mod health;
pub mod history;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate                 synchronous generation (POST)
///
/// /jobs                     submit async job (POST)
/// /jobs/{id}                job status (GET)
///
/// /history                  paginated listing (GET)
/// /history/search           substring search (GET)
/// /history/stats            counts by model/config (GET)
/// /history/{id}             entry lookup (GET), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/generate", generate::router())
        .nest("/jobs", jobs::router())
        .nest("/history", history::router())
}
