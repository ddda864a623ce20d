//! The snippet service: one explicitly constructed object owning the
//! request cache, history store, and job registry.
//!
//! Both dispatch paths funnel through [`SnippetService::resolve`]: the
//! synchronous path calls it directly, the asynchronous path reaches it via
//! [`SnippetService::process_job`] on a worker task. Cache hits skip the
//! external generator but never skip history logging.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::cache::{CacheKey, RequestCache};
use crate::error::CoreError;
use crate::generator::Generator;
use crate::history::{HistoryEntry, HistoryStore};
use crate::prompt;
use crate::registry::{Job, JobRegistry};
use crate::types::{GenerateRequest, Snippet};

/// Shared pipeline state behind the dispatch API and the worker pool.
pub struct SnippetService {
    generator: Arc<dyn Generator>,
    cache: Mutex<RequestCache>,
    history: HistoryStore,
    registry: JobRegistry,
    retention: Duration,
}

impl SnippetService {
    /// Assemble the service from its owned parts.
    ///
    /// * `cache_capacity` - LRU capacity for the request cache.
    /// * `retention`      - how long completed jobs stay queryable.
    pub fn new(
        generator: Arc<dyn Generator>,
        history: HistoryStore,
        cache_capacity: usize,
        retention: Duration,
    ) -> Self {
        Self {
            generator,
            cache: Mutex::new(RequestCache::new(cache_capacity)),
            history,
            registry: JobRegistry::new(),
            retention,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Dispatch paths
    // -----------------------------------------------------------------------

    /// Synchronous path: validate, resolve via cache-or-generate, log to
    /// history, and return the pair.
    pub async fn generate_sync(&self, request: GenerateRequest) -> Result<Snippet, CoreError> {
        prompt::validate_command(&request.command)?;
        let snippet = self.resolve(&request).await?;
        self.history
            .append(HistoryEntry::new(&request, &snippet))
            .await;
        Ok(snippet)
    }

    /// Asynchronous path, first half: validate and allocate a `queued` job.
    /// The caller is responsible for pushing the job id onto the queue.
    pub async fn create_job(&self, request: GenerateRequest) -> Result<Job, CoreError> {
        prompt::validate_command(&request.command)?;
        Ok(self.registry.create(&request).await)
    }

    /// Worker entry point: drive one job to its terminal state and run the
    /// post-completion cleanup sweep.
    ///
    /// Generation failures are recorded as the job's error payload; nothing
    /// here propagates, so the calling worker loop survives any job.
    pub async fn process_job(&self, job_id: Uuid) {
        let Some(job) = self.registry.get(job_id).await else {
            tracing::warn!(%job_id, "Job vanished from registry before processing");
            return;
        };

        self.registry.mark_processing(job_id).await;

        let request = GenerateRequest {
            command: job.command,
            model: job.model,
            config: job.config,
        };

        match self.resolve(&request).await {
            Ok(snippet) => {
                self.registry.complete(job_id, snippet.clone()).await;
                self.history
                    .append(HistoryEntry::new(&request, &snippet))
                    .await;
                tracing::info!(%job_id, "Job completed");
            }
            Err(e) => {
                tracing::warn!(%job_id, error = %e, "Job failed");
                self.registry.fail(job_id, e.to_string()).await;
            }
        }

        let swept = self.registry.sweep(self.retention).await;
        if swept > 0 {
            tracing::debug!(swept, "Evicted expired completed jobs");
        }
    }

    // -----------------------------------------------------------------------
    // Cache-or-generate
    // -----------------------------------------------------------------------

    /// Return a cached pair when possible, otherwise invoke the external
    /// generator and memoize the successful result.
    ///
    /// The cache lock is never held across the external call, so two
    /// concurrent misses on the same key may both generate; the second
    /// insert simply refreshes the entry.
    async fn resolve(&self, request: &GenerateRequest) -> Result<Snippet, CoreError> {
        let cacheable = CacheKey::cacheable(&request.command);
        let key = CacheKey::new(&request.command, &request.model, &request.config);

        if cacheable {
            if let Some(hit) = self.cache.lock().await.get(&key) {
                tracing::debug!(command = %request.command, "Request cache hit");
                return Ok(hit);
            }
        }

        let snippet = self.generate_uncached(request).await?;

        if cacheable {
            self.cache.lock().await.insert(key, snippet.clone());
        }

        Ok(snippet)
    }

    /// Two-call generation: code first, then a best-effort explanation.
    async fn generate_uncached(&self, request: &GenerateRequest) -> Result<Snippet, CoreError> {
        let raw = self
            .generator
            .generate(
                &prompt::code_prompt(&request.command),
                &request.model,
                &request.config,
            )
            .await
            .map_err(|e| CoreError::Generation(e.to_string()))?;

        let code = prompt::extract_code(&raw);
        if code.is_empty() {
            return Err(CoreError::Generation(
                "Generator returned no code".to_string(),
            ));
        }

        // The explanation call is best-effort: a failure falls back to a
        // placeholder rather than failing the whole request.
        let explanation = match self
            .generator
            .generate(
                &prompt::explanation_prompt(&code),
                &request.model,
                &request.config,
            )
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => prompt::fallback_explanation(&request.command),
            Err(e) => {
                tracing::debug!(error = %e, "Explanation call failed; using fallback");
                prompt::fallback_explanation(&request.command)
            }
        };

        Ok(Snippet { code, explanation })
    }

    // -----------------------------------------------------------------------
    // Maintenance
    // -----------------------------------------------------------------------

    /// Remove expired completed jobs (periodic background sweep).
    pub async fn sweep_jobs(&self) -> usize {
        self.registry.sweep(self.retention).await
    }

    /// Persist the history log (shutdown flush).
    pub async fn flush_history(&self) {
        self.history.flush().await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
