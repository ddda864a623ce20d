//! Ordered, size-bounded, durable log of completed generation requests.
//!
//! The store keeps entries oldest-first in memory and enforces a strict
//! FIFO bound: appending past the maximum drops the oldest entry. Every
//! mutation is followed by a whole-set write to the durable store; a failed
//! write is logged and the in-memory mutation stands (durability is
//! best-effort, not transactional).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::CoreError;
use crate::persist::HistoryPersistence;
use crate::types::{GenerateRequest, Snippet, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default maximum number of retained entries.
pub const DEFAULT_HISTORY_MAX: usize = 20;

// ---------------------------------------------------------------------------
// Entry and query types
// ---------------------------------------------------------------------------

/// A durable record of one completed generation request. Immutable once
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub command: String,
    pub code: String,
    pub explanation: String,
    pub model: String,
    pub config: String,
    pub created_at: Timestamp,
}

impl HistoryEntry {
    /// Create a new entry for a completed request, stamped with the current
    /// time.
    pub fn new(request: &GenerateRequest, snippet: &Snippet) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: request.command.clone(),
            code: snippet.code.clone(),
            explanation: snippet.explanation.clone(),
            model: request.model.clone(),
            config: request.config.clone(),
            created_at: Utc::now(),
        }
    }
}

/// One page of history entries, newest first.
#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryEntry>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Aggregate entry counts grouped by model and by config.
#[derive(Debug, Default, Serialize)]
pub struct HistoryStats {
    pub by_model: HashMap<String, usize>,
    pub by_config: HashMap<String, usize>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Size-bounded, durable history store.
///
/// Thread-safe via an interior lock held only for the duration of one
/// mutation or query (the durable write happens under the lock so the
/// on-disk set never interleaves two mutations out of order).
pub struct HistoryStore {
    max_entries: usize,
    store: Arc<dyn HistoryPersistence>,
    /// Oldest first; the newest entry is at the back.
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Create a store bounded at `max_entries`, seeded from whatever the
    /// durable store holds. A failed load is logged and the store starts
    /// empty.
    pub fn new(max_entries: usize, store: Arc<dyn HistoryPersistence>) -> Self {
        let max_entries = max_entries.max(1);
        let mut entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load history; starting empty");
                Vec::new()
            }
        };
        if entries.len() > max_entries {
            let excess = entries.len() - max_entries;
            entries.drain(..excess);
        }
        Self {
            max_entries,
            store,
            entries: Mutex::new(entries),
        }
    }

    /// Append an entry, evicting the oldest when the bound is exceeded, and
    /// persist the full set before returning.
    pub async fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        while entries.len() > self.max_entries {
            entries.remove(0);
        }
        self.persist(&entries);
    }

    /// List entries newest first, sliced to the requested page.
    ///
    /// `page` and `per_page` are 1-based positive integers; an out-of-range
    /// page yields an empty slice, not an error.
    pub async fn list(&self, page: usize, per_page: usize) -> HistoryPage {
        let page = page.max(1);
        let per_page = per_page.max(1);

        let entries = self.entries.lock().await;
        let total = entries.len();
        let items: Vec<HistoryEntry> = entries
            .iter()
            .rev()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        HistoryPage {
            items,
            total,
            page,
            per_page,
            total_pages: total.div_ceil(per_page),
        }
    }

    /// Point lookup by identifier.
    pub async fn get(&self, id: Uuid) -> Option<HistoryEntry> {
        let entries = self.entries.lock().await;
        entries.iter().find(|e| e.id == id).cloned()
    }

    /// Remove an entry by identifier and persist the reduced set.
    pub async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().await;
        let Some(pos) = entries.iter().position(|e| e.id == id) else {
            return Err(CoreError::NotFound {
                entity: "History entry",
                id,
            });
        };
        entries.remove(pos);
        self.persist(&entries);
        Ok(())
    }

    /// Case-insensitive substring search across command, code, and
    /// explanation. Returns all matches newest first, unpaginated.
    pub async fn search(&self, query: &str) -> Vec<HistoryEntry> {
        let needle = query.to_lowercase();
        let entries = self.entries.lock().await;
        entries
            .iter()
            .rev()
            .filter(|e| {
                e.command.to_lowercase().contains(&needle)
                    || e.code.to_lowercase().contains(&needle)
                    || e.explanation.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Aggregate entry counts by model and by config.
    pub async fn stats(&self) -> HistoryStats {
        let entries = self.entries.lock().await;
        let mut stats = HistoryStats::default();
        for entry in entries.iter() {
            *stats.by_model.entry(entry.model.clone()).or_default() += 1;
            *stats.by_config.entry(entry.config.clone()).or_default() += 1;
        }
        stats
    }

    /// Number of retained entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Persist the current set (used by the shutdown flush).
    pub async fn flush(&self) {
        let entries = self.entries.lock().await;
        self.persist(&entries);
    }

    /// Best-effort durable write: failures are logged, never propagated.
    fn persist(&self, entries: &[HistoryEntry]) {
        if let Err(e) = self.store.save(entries) {
            tracing::warn!(
                error = %e,
                "History persistence failed; in-memory state remains authoritative"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
