//! Core traits for the post filtering pipeline.
//!
//! This module defines the Filter trait that lets the selector and the
//! prompt builder share the same notion of a usable post.

use domain::Post;

/// Core trait for filtering posts.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent blends
/// - Filters work on borrowed posts so nothing is cloned while narrowing
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of posts.
    ///
    /// # Arguments
    /// * `posts` - The posts to filter (takes ownership of the Vec)
    ///
    /// # Returns
    /// The posts that passed, in their original order
    fn apply<'a>(&self, posts: Vec<&'a Post>) -> Vec<&'a Post>;
}
