//! Route definitions for the `/history` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /          -> list_history
/// GET    /search    -> search_history
/// GET    /stats     -> history_stats
/// GET    /{id}      -> get_entry
/// DELETE /{id}      -> delete_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list_history))
        .route("/search", get(history::search_history))
        .route("/stats", get(history::history_stats))
        .route(
            "/{id}",
            get(history::get_entry).delete(history::delete_entry),
        )
}
