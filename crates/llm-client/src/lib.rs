//! Generative text client used to produce blend analyses.
//!
//! This crate provides the boundary to the language model:
//! - The [`GenerativeBackend`] trait the analysis generator depends on
//! - [`OpenAiClient`], an implementation over the OpenAI chat completions API
//! - Classification of HTTP failures into the shared error taxonomy
//!
//! The backend is called exactly once per request. There is no retry here;
//! a rate-limit answer surfaces as `RateLimited` so the caller can decide.

use async_trait::async_trait;
use domain::Result;

pub mod openai;

pub use openai::{OpenAiClient, DEFAULT_API_URL, DEFAULT_MODEL};

/// Client for a text model that can be asked for strict JSON output.
///
/// Implementations must be `Send + Sync` so one client can serve concurrent
/// blends.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a system instruction and prompt, requesting a JSON object back.
    ///
    /// Returns the raw text of the model's answer. It is expected, but not
    /// guaranteed, to parse as JSON.
    ///
    /// # Errors
    ///
    /// `Auth`, `RateLimited`, `Transport` or `Upstream` when the call itself
    /// fails.
    async fn complete_json(&self, system: &str, prompt: &str) -> Result<String>;
}
