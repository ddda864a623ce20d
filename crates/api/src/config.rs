use std::path::PathBuf;
use std::str::FromStr;

use snipforge_core::cache::DEFAULT_CACHE_CAPACITY;
use snipforge_core::history::DEFAULT_HISTORY_MAX;
use snipforge_core::pool::DEFAULT_WORKER_COUNT;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Number of generation workers (default: `3`).
    pub worker_count: usize,
    /// Path of the durable history file.
    pub history_path: PathBuf,
    /// Maximum retained history entries (default: `20`).
    pub history_max: usize,
    /// Request cache capacity (default: `64`).
    pub cache_capacity: usize,
    /// Seconds a completed job stays queryable (default: `3600`).
    pub job_retention_secs: u64,
    /// Interval of the background job retention sweep (default: `300`).
    pub job_sweep_interval_secs: u64,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Config preset used when a request does not name one.
    pub default_config: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default             |
    /// |--------------------------|---------------------|
    /// | `HOST`                   | `0.0.0.0`           |
    /// | `PORT`                   | `5000`              |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                |
    /// | `WORKER_COUNT`           | `3`                 |
    /// | `HISTORY_PATH`           | `history.json`      |
    /// | `HISTORY_MAX`            | `20`                |
    /// | `CACHE_CAPACITY`         | `64`                |
    /// | `JOB_RETENTION_SECS`     | `3600`              |
    /// | `JOB_SWEEP_INTERVAL_SECS`| `300`               |
    /// | `DEFAULT_MODEL`          | `gemini-1.5-pro`    |
    /// | `DEFAULT_CONFIG`         | `default`           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let history_path =
            PathBuf::from(std::env::var("HISTORY_PATH").unwrap_or_else(|_| "history.json".into()));

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".into());
        let default_config = std::env::var("DEFAULT_CONFIG").unwrap_or_else(|_| "default".into());

        Self {
            host,
            port: parse_env("PORT", 5000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parse_env("SHUTDOWN_TIMEOUT_SECS", 30),
            worker_count: parse_env("WORKER_COUNT", DEFAULT_WORKER_COUNT),
            history_path,
            history_max: parse_env("HISTORY_MAX", DEFAULT_HISTORY_MAX),
            cache_capacity: parse_env("CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY),
            job_retention_secs: parse_env("JOB_RETENTION_SECS", 3600),
            job_sweep_interval_secs: parse_env("JOB_SWEEP_INTERVAL_SECS", 300),
            default_model,
            default_config,
        }
    }
}

/// Read and parse an env var, panicking on malformed values so
/// misconfiguration fails fast at startup.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid value, got '{raw}'")),
        Err(_) => default,
    }
}
