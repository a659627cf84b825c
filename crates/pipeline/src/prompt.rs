//! Prompt construction for the blend analysis.
//!
//! The prompt is a pure function of the two identities and their post
//! texts, so identical inputs always produce byte-identical prompts.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::ContentFilter;
use domain::{Identity, Post};

/// Upper bound on posts per account embedded in a prompt
pub const MAX_POSTS_PER_USER: usize = 100;

/// System instruction sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a social media analyst with a great sense of \
humor. You create entertaining and insightful analyses comparing two accounts' content and style.";

/// Usable post texts, in order, capped at [`MAX_POSTS_PER_USER`]
pub fn extract_post_texts(posts: &[Post]) -> Vec<&str> {
    FilterPipeline::new()
        .add_filter(ContentFilter)
        .apply(posts)
        .into_iter()
        .filter_map(Post::content)
        .take(MAX_POSTS_PER_USER)
        .collect()
}

/// Build the user prompt comparing two accounts
pub fn build_prompt(posts1: &[Post], posts2: &[Post], user1: &Identity, user2: &Identity) -> String {
    let corpus1 = extract_post_texts(posts1).join("\n\n");
    let corpus2 = extract_post_texts(posts2).join("\n\n");

    format!(
        r#"
You are analyzing posts from two social media accounts: @{user1} and @{user2}.

User 1 (@{user1}) posts:
{corpus1}

User 2 (@{user2}) posts:
{corpus2}

Create a fun, insightful, and detailed "Blend" analysis comparing these two accounts. The analysis should include:

1. A catchy title for their blend
2. 4-6 common topics/themes they both post about
3. 3-4 major differences in their posting styles or interests
4. A compatibility score from 0 to 100. IMPORTANT: base it on meaningful analysis of their posts and personalities, NOT a random number
5. A funny fictional post that represents a perfect blend of both their styles
6. A fictional conversation snippet between them (2-3 exchanges) grounded in their actual posts, each line prefixed with the speaker's handle
7. A blend persona description (what kind of account would emerge if they were combined)
8. "If you met IRL" potentials (dating, friendship, enemy, and "might just kill", each 0-100). IMPORTANT: derive them from their posts and personalities; DO NOT use default values
9. Optionally, one question the two of them would happily argue about

Your analysis should be witty, entertaining, and insightful. Respond with a JSON object with exactly this structure:
{{
  "title": "Catchy blend title",
  "compatibilityScore": 0,
  "commonThemes": ["Theme 1", "Theme 2", "Theme 3", "Theme 4"],
  "differences": ["Difference 1", "Difference 2", "Difference 3"],
  "blendedPost": "A sample post that combines both styles",
  "debateQuestion": "A question they would argue about",
  "conversation": ["{user1}: First line", "{user2}: Response", "{user1}: Reply"],
  "blendPersona": "What kind of account would result from combining them",
  "irlPotentials": {{
    "dating": 0,
    "friendship": 0,
    "enemy": 0,
    "mightJustKill": 0
  }},
  "summary": "A brief, funny paragraph summarizing their relationship"
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_post(text: &str) -> Post {
        Post {
            text: Some(text.to_string()),
            ..Post::default()
        }
    }

    fn identity(raw: &str) -> Identity {
        Identity::parse(raw).unwrap()
    }

    #[test]
    fn test_extract_drops_empty_and_malformed() {
        let posts = vec![
            text_post("first"),
            Post::default(),
            text_post("   "),
            text_post("second"),
        ];

        assert_eq!(extract_post_texts(&posts), vec!["first", "second"]);
    }

    #[test]
    fn test_extract_truncates_after_filtering() {
        let mut posts = vec![Post::default(); 10];
        posts.extend((0..150).map(|i| text_post(&format!("post {i}"))));

        let texts = extract_post_texts(&posts);
        assert_eq!(texts.len(), MAX_POSTS_PER_USER);
        assert_eq!(texts[0], "post 0");
        assert_eq!(texts[MAX_POSTS_PER_USER - 1], "post 99");
    }

    #[test]
    fn test_prompt_embeds_identities_and_posts() {
        let prompt = build_prompt(
            &[text_post("rust is neat")],
            &[text_post("coffee first")],
            &identity("alice"),
            &identity("bob"),
        );

        assert!(prompt.contains("@alice and @bob"));
        assert!(prompt.contains("User 1 (@alice) posts:\nrust is neat"));
        assert!(prompt.contains("User 2 (@bob) posts:\ncoffee first"));
        assert!(prompt.contains("\"compatibilityScore\""));
        assert!(prompt.contains("\"mightJustKill\""));
    }

    #[test]
    fn test_prompt_excludes_posts_past_the_limit() {
        let posts: Vec<Post> = (0..120).map(|i| text_post(&format!("item-{i:03}"))).collect();
        let prompt = build_prompt(&posts, &[], &identity("a"), &identity("b"));

        assert!(prompt.contains("item-099"));
        assert!(!prompt.contains("item-100"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let posts = vec![text_post("one"), text_post("two")];
        let a = build_prompt(&posts, &posts, &identity("x"), &identity("y"));
        let b = build_prompt(&posts, &posts, &identity("x"), &identity("y"));
        assert_eq!(a, b);
    }
}
