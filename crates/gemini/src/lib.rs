//! HTTP client for the Gemini text-generation API.
//!
//! Implements the core's [`Generator`](snipforge_core::generator::Generator)
//! trait so the pipeline stays ignorant of which service produces the text.

pub mod api;
pub mod params;

pub use api::{GeminiApi, GeminiApiError};
pub use params::GenerationParams;
