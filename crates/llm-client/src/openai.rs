//! OpenAI chat completions backend.
//!
//! Sends a system + user message pair with JSON response mode enabled and
//! returns the first choice's content untouched. Validation of that content
//! is the caller's job.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::GenerativeBackend;
use domain::{BlendError, Result, Service};

/// OpenAI Chat Completions API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Model identifier (e.g., "gpt-4o").
    model: String,
    /// Full chat completions URL.
    api_url: String,
    /// Sampling temperature; the API default applies when unset.
    temperature: Option<f64>,
}

impl OpenAiClient {
    /// Create a client for the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_url: DEFAULT_API_URL.to_string(),
            temperature: None,
        }
    }

    /// Point the client at a different chat completions URL (proxies, compatible servers)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Configure the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Get the model this client requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiErrorBody {
    error: Option<ApiError>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiError {
    message: Option<String>,
}

#[async_trait]
impl GenerativeBackend for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete_json(&self, system: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(system, prompt);
        debug!(
            "Requesting completion from {} ({} prompt bytes)",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Error calling generation API: {}", e);
                BlendError::Transport {
                    service: Service::Generation,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|err| err.message);
            let err = error_for_status(status.as_u16(), message);
            error!("Error generating blend: {}", err);
            return Err(err);
        }

        let body = response.json::<ChatResponse>().await.map_err(|e| {
            error!("Invalid completion payload: {}", e);
            BlendError::Upstream {
                service: Service::Generation,
                status: Some(status.as_u16()),
                message: format!("invalid response body: {e}"),
            }
        })?;

        first_completion(body)
    }
}

fn first_completion(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| BlendError::Upstream {
            service: Service::Generation,
            status: None,
            message: "response contained no completion".to_string(),
        })
}

/// Map a non-success status from the generation API onto the taxonomy
pub(crate) fn error_for_status(status: u16, message: Option<String>) -> BlendError {
    match status {
        401 | 403 => BlendError::Auth {
            service: Service::Generation,
            message: message.unwrap_or_else(|| "check the OpenAI API key".to_string()),
        },
        429 => BlendError::RateLimited {
            service: Service::Generation,
        },
        _ => BlendError::Upstream {
            service: Service::Generation,
            status: Some(status),
            message: message.unwrap_or_else(|| "Unknown error".to_string()),
        },
    }
}
