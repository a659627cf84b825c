//! Filter to drop malformed posts that carry no engagement counters.

use crate::traits::Filter;
use domain::Post;

/// Keeps posts that have an engagement block, even if every counter is 0.
pub struct EngagementFilter;

impl Filter for EngagementFilter {
    fn name(&self) -> &str {
        "EngagementFilter"
    }

    fn apply<'a>(&self, posts: Vec<&'a Post>) -> Vec<&'a Post> {
        posts.into_iter().filter(|post| post.has_engagement()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Engagement;

    #[test]
    fn test_engagement_filter() {
        let posts = vec![
            Post::default(),
            Post {
                engagement: Some(Engagement::default()),
                ..Post::default()
            },
        ];

        let filtered = EngagementFilter.apply(posts.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].has_engagement());
    }
}
