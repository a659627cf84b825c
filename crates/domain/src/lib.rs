//! # Domain Crate
//!
//! Shared vocabulary for the post-blend pipeline.
//!
//! ## Main Components
//!
//! - **identity**: Handle normalization (`Identity`) and the unordered `PairKey`
//! - **types**: Posts, engagement counters and the blend analysis
//! - **cache**: Injectable in-memory caches for post lists and finished blends
//! - **error**: The stable error taxonomy every stage reports through
//!
//! ## Example Usage
//!
//! ```ignore
//! use domain::{Identity, PairKey};
//!
//! let a = Identity::parse("@alice")?;
//! let b = Identity::parse(" bob ")?;
//!
//! // Same key whichever way round the pair is given
//! assert_eq!(PairKey::new(&a, &b), PairKey::new(&b, &a));
//! ```

// Public modules
pub mod cache;
pub mod error;
pub mod identity;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::{BlendCache, MemoryCache, PostCache};
pub use error::{BlendError, ErrorKind, ErrorResponse, Result, Service};
pub use identity::{Identity, PairKey};
pub use types::{
    Analysis,
    BlendResult,
    Engagement,
    IrlPotentials,
    Post,
    PostList,
    Utterance,
};
