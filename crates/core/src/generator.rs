//! The external text-generation seam.
//!
//! The pipeline never talks to a generation service directly; it goes
//! through [`Generator`], which production code implements with the Gemini
//! HTTP client and tests implement with scripted fakes.

use async_trait::async_trait;

/// Errors from the external generation call.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The request never produced a usable response (network, DNS, TLS...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("generator API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but the response carried no text.
    #[error("generator returned an empty response")]
    Empty,
}

/// An opaque text-generation backend.
///
/// * `model`  - identifier of the underlying model.
/// * `config` - named parameter preset understood by the implementation.
///
/// Implementations are shared across worker tasks and must be `Send + Sync`.
/// No timeout is imposed here; callers needing bounded latency wrap the
/// implementation.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        config: &str,
    ) -> Result<String, GeneratorError>;
}
