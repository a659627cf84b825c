//! Wire format of the scraper API.
//!
//! Every field is optional: the upstream payload is large, loosely typed and
//! routinely omits blocks. Elements that do not even deserialize become
//! empty (malformed) posts rather than failing the whole list.

use domain::{Engagement, Post, PostList};
use serde::Deserialize;
use serde_json::Value;

/// Top-level body of a successful response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostsResponse {
    pub tweets: Option<Vec<Value>>,
}

impl PostsResponse {
    pub fn into_posts(self) -> PostList {
        self.tweets
            .unwrap_or_default()
            .into_iter()
            .map(post_from_value)
            .collect()
    }
}

/// Body of a non-success response, when the API bothers to send one
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPost {
    rest_id: Option<String>,
    legacy: Option<RawLegacy>,
    core: Option<RawCore>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLegacy {
    id_str: Option<String>,
    full_text: Option<String>,
    created_at: Option<String>,
    reply_count: Option<u64>,
    retweet_count: Option<u64>,
    favorite_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCore {
    user_results: Option<RawUserResults>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUserResults {
    result: Option<RawUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    legacy: Option<RawUserLegacy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUserLegacy {
    profile_image_url_https: Option<String>,
}

/// Convert one raw element, degrading to an empty post on shape mismatch
pub fn post_from_value(value: Value) -> Post {
    serde_json::from_value::<RawPost>(value)
        .map(convert)
        .unwrap_or_default()
}

fn convert(raw: RawPost) -> Post {
    let author_image_url = raw
        .core
        .and_then(|core| core.user_results)
        .and_then(|results| results.result)
        .and_then(|user| user.legacy)
        .and_then(|legacy| legacy.profile_image_url_https);

    let Some(legacy) = raw.legacy else {
        return Post {
            id: raw.rest_id,
            author_image_url,
            ..Post::default()
        };
    };

    // Engagement is only meaningful if at least one counter came back
    let has_counters = legacy.reply_count.is_some()
        || legacy.retweet_count.is_some()
        || legacy.favorite_count.is_some();
    let engagement = has_counters.then_some(Engagement {
        reply_count: legacy.reply_count,
        repost_count: legacy.retweet_count,
        favorite_count: legacy.favorite_count,
    });

    Post {
        id: raw.rest_id.or(legacy.id_str),
        text: legacy.full_text,
        created_at: legacy.created_at,
        engagement,
        author_image_url,
    }
}
