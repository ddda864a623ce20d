//! Fixed-size worker pool draining the shared job queue.
//!
//! Workers are long-lived tokio tasks sharing a single channel. Each worker
//! blocks on the queue, drives one job at a time through
//! [`SnippetService::process_job`], and loops. A distinguished sentinel
//! task tells exactly one worker to exit; shutdown pushes one sentinel per
//! worker and then joins each with a bounded wait.
//!
//! Ordering: tasks are FIFO within one worker, but two jobs enqueued in
//! sequence may complete out of order across workers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::service::SnippetService;

/// Default number of workers.
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// A unit of work on the shared queue.
#[derive(Debug)]
enum Task {
    /// Process the job with this registry id.
    Generate(Uuid),
    /// Instruct one worker to exit its loop. Only sent at shutdown.
    Shutdown,
}

/// Error returned when submitting to a queue whose workers have stopped.
#[derive(Debug, thiserror::Error)]
#[error("job queue is closed")]
pub struct QueueClosed;

/// Cloneable handle for pushing jobs onto the shared queue.
#[derive(Clone)]
pub struct JobQueue {
    sender: mpsc::UnboundedSender<Task>,
}

impl JobQueue {
    /// Enqueue a job for background processing. Non-blocking.
    pub fn submit(&self, job_id: Uuid) -> Result<(), QueueClosed> {
        self.sender
            .send(Task::Generate(job_id))
            .map_err(|_| QueueClosed)
    }
}

/// Fixed set of long-lived worker tasks consuming one shared queue.
pub struct WorkerPool {
    queue: JobQueue,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `count` workers (minimum 1) processing jobs against `service`.
    pub fn start(service: Arc<SnippetService>, count: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let count = count.max(1);
        let workers = (0..count)
            .map(|worker_id| {
                let service = Arc::clone(&service);
                let receiver = Arc::clone(&receiver);
                tokio::spawn(worker_loop(worker_id, service, receiver))
            })
            .collect();

        tracing::info!(worker_count = count, "Worker pool started");

        Self {
            queue: JobQueue { sender },
            workers,
        }
    }

    /// Handle for enqueueing jobs. Stays valid after the pool struct is
    /// dropped, as long as workers are running.
    pub fn queue(&self) -> JobQueue {
        self.queue.clone()
    }

    /// Coordinated drain: one sentinel per worker, then join each worker
    /// with a bounded wait. Workers finish their current task first.
    pub async fn shutdown(self, timeout: Duration) {
        for _ in 0..self.workers.len() {
            if self.queue.sender.send(Task::Shutdown).is_err() {
                // Channel already closed; workers are gone.
                break;
            }
        }

        for handle in self.workers {
            if tokio::time::timeout(timeout, handle).await.is_err() {
                tracing::warn!("Worker did not stop within the shutdown timeout");
            }
        }

        tracing::info!("Worker pool stopped");
    }
}

/// One worker: block on the queue, process, repeat until sentinel.
async fn worker_loop(
    worker_id: usize,
    service: Arc<SnippetService>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Task>>>,
) {
    tracing::debug!(worker_id, "Worker started");

    loop {
        // Hold the receiver lock only while waiting for the next task, so
        // sibling workers can take over as soon as one is dequeued.
        let task = {
            let mut rx = receiver.lock().await;
            rx.recv().await
        };

        match task {
            Some(Task::Generate(job_id)) => {
                tracing::debug!(worker_id, %job_id, "Worker picked up job");
                service.process_job(job_id).await;
            }
            Some(Task::Shutdown) | None => break,
        }
    }

    tracing::debug!(worker_id, "Worker stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
