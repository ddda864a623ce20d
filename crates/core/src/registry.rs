//! In-memory job registry with time-based eviction of completed entries.
//!
//! The registry is the sole owner of [`Job`] records. The dispatch path
//! creates entries in `queued` state; the worker that dequeues a job is the
//! only writer of its `processing` and terminal states, so there is no
//! lost-update window. Completed entries are evicted once they outlive the
//! retention window; queued, processing, and error entries are never
//! auto-removed.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::{GenerateRequest, Snippet, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default retention window for completed jobs: 1 hour.
pub const DEFAULT_JOB_RETENTION: Duration = Duration::from_secs(3600);

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// Lifecycle status of an asynchronous generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl JobStatus {
    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

/// One asynchronous unit of generation work.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub command: String,
    pub model: String,
    pub config: String,
    pub status: JobStatus,
    /// Result payload, present once the job completes.
    pub result: Option<Snippet>,
    /// Error message, present once the job fails.
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Thread-safe registry mapping job identifiers to their current state.
///
/// Designed to be held inside the service and shared across worker tasks;
/// the interior lock is held only for the duration of a single read or
/// write.
pub struct JobRegistry {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Create a job in `queued` state and return a copy of it.
    pub async fn create(&self, request: &GenerateRequest) -> Job {
        let job = Job {
            id: Uuid::new_v4(),
            command: request.command.clone(),
            model: request.model.clone(),
            config: request.config.clone(),
            status: JobStatus::Queued,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.jobs.write().await.insert(job.id, job.clone());
        job
    }

    /// Current state of a job, or `None` if it was evicted or never existed.
    pub async fn get(&self, id: Uuid) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Number of registered jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Transition a job to `processing`. Worker-only.
    pub async fn mark_processing(&self, id: Uuid) {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if !job.status.is_terminal() => job.status = JobStatus::Processing,
            Some(job) => {
                tracing::warn!(job_id = %id, status = ?job.status, "Refusing to reopen a terminal job");
            }
            None => tracing::warn!(job_id = %id, "Job missing from registry"),
        }
    }

    /// Record a successful result. Worker-only; the first terminal write
    /// wins and later ones are ignored.
    pub async fn complete(&self, id: Uuid, snippet: Snippet) {
        self.finish(id, JobStatus::Completed, Some(snippet), None).await;
    }

    /// Record a failure. Worker-only; the first terminal write wins.
    pub async fn fail(&self, id: Uuid, message: String) {
        self.finish(id, JobStatus::Error, None, Some(message)).await;
    }

    async fn finish(
        &self,
        id: Uuid,
        status: JobStatus,
        result: Option<Snippet>,
        error: Option<String>,
    ) {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if !job.status.is_terminal() => {
                job.status = status;
                job.result = result;
                job.error = error;
                job.completed_at = Some(Utc::now());
            }
            Some(job) => {
                tracing::warn!(
                    job_id = %id,
                    status = ?job.status,
                    "Ignoring second terminal write for job"
                );
            }
            None => tracing::warn!(job_id = %id, "Job missing from registry"),
        }
    }

    /// Remove completed jobs older than `retention`. Returns the number of
    /// evicted entries. Only `completed` entries are eligible.
    pub async fn sweep(&self, retention: Duration) -> usize {
        self.sweep_at(Utc::now(), retention).await
    }

    async fn sweep_at(&self, now: Timestamp, retention: Duration) -> usize {
        let retention = chrono::Duration::from_std(retention).unwrap_or(chrono::Duration::MAX);
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| {
            job.status != JobStatus::Completed
                || job
                    .completed_at
                    .map_or(true, |done| now - done <= retention)
        });
        before - jobs.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
