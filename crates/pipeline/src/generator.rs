//! Analysis generation: prompt, one model call, strict parse.

use std::sync::Arc;

use domain::{Analysis, Identity, Post, Result};
use llm_client::GenerativeBackend;
use tracing::{debug, instrument, warn};

use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::schema::parse_analysis;

/// Produces a blend analysis for two accounts' posts.
///
/// Each call issues exactly one backend request. Nothing is cached here;
/// the orchestrator owns result caching.
pub struct AnalysisGenerator {
    backend: Arc<dyn GenerativeBackend>,
}

impl AnalysisGenerator {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Generate the analysis comparing `user1` and `user2`
    #[instrument(skip(self, posts1, posts2), fields(backend = self.backend.name()))]
    pub async fn generate(
        &self,
        posts1: &[Post],
        posts2: &[Post],
        user1: &Identity,
        user2: &Identity,
    ) -> Result<Analysis> {
        let prompt = build_prompt(posts1, posts2, user1, user2);
        debug!("Built prompt ({} bytes) for @{} and @{}", prompt.len(), user1, user2);

        let raw = self.backend.complete_json(SYSTEM_INSTRUCTION, &prompt).await?;

        parse_analysis(&raw).inspect_err(|e| {
            warn!("Discarding model output for @{} and @{}: {}", user1, user2, e);
        })
    }
}
