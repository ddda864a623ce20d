//! Shared helpers for API integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use snipforge_api::config::ServerConfig;
use snipforge_api::routes;
use snipforge_api::state::AppState;
use snipforge_core::generator::{Generator, GeneratorError};
use snipforge_core::history::{HistoryEntry, HistoryStore};
use snipforge_core::persist::{HistoryPersistence, PersistError};
use snipforge_core::pool::WorkerPool;
use snipforge_core::service::SnippetService;

/// Generator double: fenced code for code prompts, plain text for
/// explanation prompts. Deterministic and instant.
pub struct StubGenerator;

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _model: &str,
        _config: &str,
    ) -> Result<String, GeneratorError> {
        if prompt.starts_with("Provide a brief explanation") {
            Ok("A brief explanation.".to_string())
        } else {
            Ok("```python\nprint(42)\n```".to_string())
        }
    }
}

/// Persistence double that drops everything; durability behaviour is
/// covered by the core crate's tests.
pub struct NullStore;

impl HistoryPersistence for NullStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistError> {
        Ok(Vec::new())
    }

    fn save(&self, _entries: &[HistoryEntry]) -> Result<(), PersistError> {
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        worker_count: 3,
        history_path: "unused-history.json".into(),
        history_max: 100,
        cache_capacity: 64,
        job_retention_secs: 3600,
        job_sweep_interval_secs: 300,
        default_model: "gemini-1.5-pro".to_string(),
        default_config: "default".to_string(),
    }
}

/// Build the full application router with all middleware layers, plus the
/// service behind it and a running worker pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The returned service handle lets
/// tests seed history or inspect the registry directly.
pub fn build_test_app() -> (Router, Arc<SnippetService>) {
    let config = test_config();

    let history = HistoryStore::new(config.history_max, Arc::new(NullStore));
    let service = Arc::new(SnippetService::new(
        Arc::new(StubGenerator),
        history,
        config.cache_capacity,
        Duration::from_secs(config.job_retention_secs),
    ));

    let pool = WorkerPool::start(Arc::clone(&service), config.worker_count);

    let state = AppState {
        service: Arc::clone(&service),
        queue: pool.queue(),
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, service)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a DELETE request against the app.
pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}
