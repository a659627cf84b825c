//! # Blend Orchestrator
//!
//! This module coordinates the entire blend pipeline:
//! 1. Validate and normalize both handles
//! 2. Check the pair cache (order-independent)
//! 3. Fetch both post lists concurrently
//! 4. Reject accounts with no posts
//! 5. Select each account's best post
//! 6. Generate the analysis
//! 7. Merge, cache and return
//!
//! Errors from the fetcher and the generator pass through unchanged, and a
//! failed blend never leaves anything in the pair cache.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use domain::{BlendCache, BlendError, BlendResult, Identity, PairKey, PostCache, PostList, Result};
use llm_client::{GenerativeBackend, OpenAiClient};
use pipeline::{select_best, AnalysisGenerator};
use sources::{ContentBackend, ContentFetcher, ScraperClient};

use crate::config::BlendConfig;

/// Main orchestrator that coordinates the blend pipeline
#[derive(Clone)]
pub struct BlendOrchestrator {
    fetcher: ContentFetcher,
    generator: Arc<AnalysisGenerator>,
    cache: Arc<BlendCache>,
}

impl BlendOrchestrator {
    /// Create an orchestrator from explicit backends and caches
    ///
    /// # Arguments
    /// * `content` - Source of post lists
    /// * `generative` - Model used for the analysis
    /// * `post_cache` - Identity -> posts memo, shared with the fetcher
    /// * `blend_cache` - PairKey -> finished blend memo
    pub fn new(
        content: Arc<dyn ContentBackend>,
        generative: Arc<dyn GenerativeBackend>,
        post_cache: Arc<PostCache>,
        blend_cache: Arc<BlendCache>,
    ) -> Self {
        Self {
            fetcher: ContentFetcher::new(content, post_cache),
            generator: Arc::new(AnalysisGenerator::new(generative)),
            cache: blend_cache,
        }
    }

    /// Wire up the HTTP backends described by `config` with fresh caches
    pub fn from_config(config: &BlendConfig) -> Self {
        let content = ScraperClient::new(&config.base_url, &config.scraper_api_key);
        let generative = OpenAiClient::new(&config.openai_api_key, &config.openai_model)
            .with_api_url(&config.openai_base_url);

        Self::new(
            Arc::new(content),
            Arc::new(generative),
            Arc::new(PostCache::new()),
            Arc::new(BlendCache::new()),
        )
    }

    /// The content fetcher, for callers that only need posts
    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    /// The finished-blend cache
    pub fn cache(&self) -> &Arc<BlendCache> {
        &self.cache
    }

    /// Main entry point: blend two accounts
    ///
    /// # Arguments
    /// * `user1` - First handle, with or without a leading `@`
    /// * `user2` - Second handle
    ///
    /// # Returns
    /// The shared blend result. Asking for the same pair again, in either
    /// order, returns the identical `Arc` without any external call.
    pub async fn blend(&self, user1: &str, user2: &str) -> Result<Arc<BlendResult>> {
        // Start timing
        let start_time = Instant::now();

        // Both handles are validated before anything external happens
        let id1 = Identity::parse(user1)?;
        let id2 = Identity::parse(user2)?;

        let key = PairKey::new(&id1, &id2);
        if let Some(cached) = self.cache.get(&key) {
            info!("Blend cache hit for {}", key);
            return Ok(cached);
        }

        // Fetch both post lists in parallel; first failure wins
        let (posts1, posts2) = tokio::try_join!(self.fetcher.fetch(&id1), self.fetcher.fetch(&id2))?;
        info!(
            "Fetched {} posts for @{} and {} posts for @{}",
            posts1.len(),
            id1,
            posts2.len(),
            id2
        );

        ensure_posts(&posts1, &id1)?;
        ensure_posts(&posts2, &id2)?;

        // Select best posts
        let user1_best_post = select_best(&posts1).cloned();
        let user2_best_post = select_best(&posts2).cloned();
        debug!(
            "Best posts: @{} -> {:?}, @{} -> {:?}",
            id1,
            user1_best_post.as_ref().and_then(|p| p.id.as_deref()),
            id2,
            user2_best_post.as_ref().and_then(|p| p.id.as_deref())
        );

        // Generate analysis
        let analysis = self
            .generator
            .generate(&posts1, &posts2, &id1, &id2)
            .await?;
        info!(
            "Generated analysis \"{}\" (compatibility {})",
            analysis.title, analysis.compatibility_score
        );

        let result = Arc::new(BlendResult {
            analysis,
            user1: id1,
            user2: id2,
            user1_best_post,
            user2_best_post,
        });
        self.cache.insert(key, Arc::clone(&result));

        // Log total time
        let elapsed = start_time.elapsed();
        info!(
            "Total time to blend @{} and @{}: {:.2?}",
            result.user1, result.user2, elapsed
        );
        Ok(result)
    }
}

fn ensure_posts(posts: &PostList, identity: &Identity) -> Result<()> {
    if posts.is_empty() {
        return Err(BlendError::InsufficientData {
            identity: identity.to_string(),
        });
    }
    Ok(())
}
