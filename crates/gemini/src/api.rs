//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps the `models/{model}:generateContent` HTTP API using [`reqwest`]
//! and flattens the candidate/part response structure down to the single
//! text payload the pipeline needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snipforge_core::generator::{Generator, GeneratorError};

use crate::params::GenerationParams;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP client for the Gemini text-generation service.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but carried no text parts.
    #[error("Gemini returned no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate, if any.
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl GeminiApi {
    /// Create a client for the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Request a completion for `prompt` from `model`.
    ///
    /// Sends `POST /v1beta/models/{model}:generateContent` and returns the
    /// first candidate's text.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GeminiApiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: params.clone(),
        };

        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(model, status = status.as_u16(), "Gemini response received");

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(GeminiApiError::EmptyResponse)
    }
}

#[async_trait]
impl Generator for GeminiApi {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        config: &str,
    ) -> Result<String, GeneratorError> {
        let params = GenerationParams::for_config(config);
        self.generate_content(model, prompt, &params)
            .await
            .map_err(GeneratorError::from)
    }
}

impl From<GeminiApiError> for GeneratorError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) => GeneratorError::Transport(e.to_string()),
            GeminiApiError::Api { status, body } => GeneratorError::Api { status, body },
            GeminiApiError::EmptyResponse => GeneratorError::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
