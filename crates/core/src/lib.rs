//! Snipforge core: the asynchronous code-generation pipeline.
//!
//! Everything stateful lives behind [`service::SnippetService`], an
//! explicitly constructed object owning the request cache, history store,
//! and job registry. The [`pool::WorkerPool`] drains the shared job queue
//! against that service; the HTTP layer in `snipforge-api` is a thin
//! dispatch surface over both.

pub mod cache;
pub mod error;
pub mod generator;
pub mod history;
pub mod persist;
pub mod pool;
pub mod prompt;
pub mod registry;
pub mod service;
pub mod types;
