//! Core domain types for the blend pipeline.
//!
//! Posts arrive from an external API and are frequently incomplete, so every
//! wire-facing field is an `Option`. The analysis types, by contrast, are
//! only ever constructed after validation and carry plain values.

use crate::identity::Identity;
use serde::{Deserialize, Serialize};

// =============================================================================
// Post-related Types
// =============================================================================

/// Engagement counters attached to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub reply_count: Option<u64>,
    pub repost_count: Option<u64>,
    pub favorite_count: Option<u64>,
}

impl Engagement {
    /// Reposts plus favorites, with missing counters treated as 0
    pub fn score(&self) -> u64 {
        self.repost_count
            .unwrap_or(0)
            .saturating_add(self.favorite_count.unwrap_or(0))
    }
}

/// A single post by one account.
///
/// A post without an `engagement` block is considered malformed: it can
/// still be shown, but it never wins a best-post comparison against a
/// well-formed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: Option<String>,
    pub text: Option<String>,
    /// Creation time exactly as the content API reported it
    pub created_at: Option<String>,
    pub engagement: Option<Engagement>,
    pub author_image_url: Option<String>,
}

impl Post {
    pub fn has_engagement(&self) -> bool {
        self.engagement.is_some()
    }

    /// Engagement score, 0 for malformed posts
    pub fn engagement_score(&self) -> u64 {
        self.engagement.map(|e| e.score()).unwrap_or(0)
    }

    /// The post's text, if it has any non-blank content
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.trim().is_empty())
    }
}

/// All posts retrieved for one identity, in API order
pub type PostList = Vec<Post>;

// =============================================================================
// Analysis Types
// =============================================================================

/// One line of the imagined conversation between the two accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Utterance {
    /// Label as written by the model, e.g. "User1" or the handle
    pub speaker: String,
    pub text: String,
}

/// "If you met in person" scores, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrlPotentials {
    pub dating: u8,
    pub friendship: u8,
    pub enemy: u8,
    pub might_just_kill: u8,
}

/// The validated output of the generative model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub title: String,
    /// 0-100
    pub compatibility_score: u8,
    pub common_themes: Vec<String>,
    pub differences: Vec<String>,
    pub blended_post: String,
    pub debate_question: Option<String>,
    pub conversation: Vec<Utterance>,
    pub blend_persona: String,
    pub irl_potentials: IrlPotentials,
    pub summary: String,
}

/// Final blend returned to the caller and stored in the pair cache
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendResult {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub user1: Identity,
    pub user2: Identity,
    pub user1_best_post: Option<Post>,
    pub user2_best_post: Option<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_score_ignores_replies() {
        let engagement = Engagement {
            reply_count: Some(100),
            repost_count: Some(3),
            favorite_count: Some(4),
        };
        assert_eq!(engagement.score(), 7);
    }

    #[test]
    fn test_engagement_score_treats_missing_as_zero() {
        let engagement = Engagement {
            reply_count: None,
            repost_count: None,
            favorite_count: Some(9),
        };
        assert_eq!(engagement.score(), 9);
        assert_eq!(Engagement::default().score(), 0);
    }

    #[test]
    fn test_malformed_post_scores_zero() {
        let post = Post {
            text: Some("hello".to_string()),
            ..Post::default()
        };
        assert!(!post.has_engagement());
        assert_eq!(post.engagement_score(), 0);
    }

    #[test]
    fn test_content_skips_blank_text() {
        let blank = Post {
            text: Some("   ".to_string()),
            ..Post::default()
        };
        assert_eq!(blank.content(), None);
        assert_eq!(Post::default().content(), None);
    }

    #[test]
    fn test_blend_result_serializes_flat_camel_case() {
        let result = BlendResult {
            analysis: Analysis {
                title: "Chaos Twins".to_string(),
                compatibility_score: 72,
                blended_post: "gm".to_string(),
                ..Analysis::default()
            },
            user1: Identity::parse("alice").unwrap(),
            user2: Identity::parse("bob").unwrap(),
            user1_best_post: None,
            user2_best_post: Some(Post::default()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["title"], "Chaos Twins");
        assert_eq!(json["compatibilityScore"], 72);
        assert_eq!(json["user1"], "alice");
        assert!(json["user1BestPost"].is_null());
        assert!(json["user2BestPost"].is_object());
        assert_eq!(json["irlPotentials"]["mightJustKill"], 0);
    }
}
