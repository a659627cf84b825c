//! The content-retrieval boundary.

use async_trait::async_trait;
use domain::{Identity, PostList, Result};

/// Anything that can turn an identity into its recent posts.
///
/// Implementations report failures with the shared taxonomy:
/// `NotFound`, `Auth`, `RateLimited`, `Transport` or `Upstream`.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Returns the name of this backend (for logging)
    fn name(&self) -> &'static str;

    /// Fetch every post the backend returns for `identity`, in API order
    async fn fetch_posts(&self, identity: &Identity) -> Result<PostList>;
}
