//! Shared value types used across the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used across the crate (UTC).
pub type Timestamp = DateTime<Utc>;

/// A generated code snippet paired with its natural-language explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub code: String,
    pub explanation: String,
}

/// One generation request: the command text plus model/config selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Natural-language instruction describing the code to produce.
    pub command: String,
    /// Identifier of the underlying model (e.g. `gemini-1.5-pro`).
    pub model: String,
    /// Name of the generation parameter preset (e.g. `default`).
    pub config: String,
}
