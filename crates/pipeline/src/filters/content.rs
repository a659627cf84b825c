//! Filter to drop posts with no usable text.
//!
//! Posts without text, or with only whitespace, add nothing to a prompt.

use crate::traits::Filter;
use domain::Post;

/// Keeps posts whose text has non-blank content.
pub struct ContentFilter;

impl Filter for ContentFilter {
    fn name(&self) -> &str {
        "ContentFilter"
    }

    fn apply<'a>(&self, posts: Vec<&'a Post>) -> Vec<&'a Post> {
        posts
            .into_iter()
            .filter(|post| post.content().is_some())
            .collect()
    }
}
