//! Periodic eviction of expired completed jobs.
//!
//! Workers already sweep the registry after each completion; this task
//! covers the gap where no further completions occur, so the last batch of
//! completed jobs still ages out. Runs on a fixed interval using
//! `tokio::time::interval` until cancelled.

use std::sync::Arc;
use std::time::Duration;

use snipforge_core::service::SnippetService;
use tokio_util::sync::CancellationToken;

/// Run the job retention sweep loop.
///
/// Evicts completed jobs older than the service's retention window every
/// `interval`. Runs until `cancel` is triggered.
pub async fn run(service: Arc<SnippetService>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Job retention sweep started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                let swept = service.sweep_jobs().await;
                if swept > 0 {
                    tracing::info!(swept, "Job retention: evicted expired jobs");
                } else {
                    tracing::debug!("Job retention: nothing to evict");
                }
            }
        }
    }
}
