//! HTTP client for the scraper content API.
//!
//! `GET {base_url}?handle=<identity>` with the key in an `x-api-key` header.
//! A successful body looks like `{"tweets": [...]}`; see [`crate::dto`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::backend::ContentBackend;
use crate::dto::{ErrorBody, PostsResponse};
use domain::{BlendError, Identity, PostList, Result, Service};

/// Content backend backed by the scraper REST API
#[derive(Debug, Clone)]
pub struct ScraperClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ScraperClient {
    /// Create a client for the given endpoint and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Get the endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ContentBackend for ScraperClient {
    fn name(&self) -> &'static str {
        "scraper"
    }

    async fn fetch_posts(&self, identity: &Identity) -> Result<PostList> {
        debug!("Requesting posts for {} from {}", identity, self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("handle", identity.as_str())])
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching posts for {}: {}", identity, e);
                BlendError::Transport {
                    service: Service::Content,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            // The body is only used for the error message; ignore read failures
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            let err = error_for_status(status.as_u16(), identity, message);
            error!("Error fetching posts for {}: {}", identity, err);
            return Err(err);
        }

        let body = response.json::<PostsResponse>().await.map_err(|e| {
            error!("Invalid posts payload for {}: {}", identity, e);
            BlendError::Upstream {
                service: Service::Content,
                status: Some(status.as_u16()),
                message: format!("invalid response body: {e}"),
            }
        })?;

        let posts = body.into_posts();
        debug!("Received {} posts for {}", posts.len(), identity);
        Ok(posts)
    }
}

/// Map a non-success status from the content API onto the taxonomy
pub(crate) fn error_for_status(
    status: u16,
    identity: &Identity,
    message: Option<String>,
) -> BlendError {
    match status {
        404 => BlendError::NotFound {
            identity: identity.to_string(),
        },
        401 | 403 => BlendError::Auth {
            service: Service::Content,
            message: message.unwrap_or_else(|| "check the scraper API key".to_string()),
        },
        429 => BlendError::RateLimited {
            service: Service::Content,
        },
        _ => BlendError::Upstream {
            service: Service::Content,
            status: Some(status),
            message: message.unwrap_or_else(|| "Unknown error".to_string()),
        },
    }
}
