//! Best-post selection.
//!
//! ## Algorithm
//! 1. Drop malformed posts (no engagement block)
//! 2. If that drops everything, fall back to the first raw post
//! 3. Otherwise scan once, keeping the highest repost + favorite score;
//!    on ties the earliest post wins

use crate::filters::EngagementFilter;
use crate::traits::Filter;
use domain::Post;

/// Pick the post that best represents an account.
///
/// Returns `None` only for an empty list. Pure: the same input always
/// yields the same post.
pub fn select_best(posts: &[Post]) -> Option<&Post> {
    let first = posts.first()?;

    let candidates = EngagementFilter.apply(posts.iter().collect());
    let mut iter = candidates.into_iter();
    let Some(mut best) = iter.next() else {
        // Posts exist but none carries engagement data
        return Some(first);
    };

    let mut best_score = best.engagement_score();
    for post in iter {
        let score = post.engagement_score();
        if score > best_score {
            best = post;
            best_score = score;
        }
    }

    Some(best)
}
