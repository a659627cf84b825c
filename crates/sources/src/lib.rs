//! # Sources Crate
//!
//! Retrieves the posts a blend is built from.
//!
//! ## Components
//!
//! ### ContentBackend
//! The boundary to the outside world: identity in, posts (or a classified
//! failure) out. `ScraperClient` is the HTTP implementation; tests plug in
//! their own.
//!
//! ### ContentFetcher
//! Memoizes backend results per normalized identity and collapses concurrent
//! first-time requests for the same identity into one upstream call.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{ContentFetcher, ScraperClient};
//! use domain::PostCache;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(ScraperClient::new(base_url, api_key));
//! let fetcher = ContentFetcher::new(backend, Arc::new(PostCache::new()));
//!
//! // "@alice" and " alice " resolve to the same cache entry
//! let posts = fetcher.fetch_posts("@alice").await?;
//! ```

// Public modules
pub mod backend;
pub mod dto;
pub mod fetcher;
pub mod scraper;

// Re-export commonly used types
pub use backend::ContentBackend;
pub use fetcher::ContentFetcher;
pub use scraper::ScraperClient;
