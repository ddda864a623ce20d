use std::sync::Arc;

use snipforge_core::pool::JobQueue;
use snipforge_core::service::SnippetService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// The snippet pipeline: cache, history, registry, generator.
    pub service: Arc<SnippetService>,
    /// Handle for pushing jobs onto the worker pool's queue.
    pub queue: JobQueue,
    /// Server configuration (defaults for model/config selection).
    pub config: Arc<ServerConfig>,
}
