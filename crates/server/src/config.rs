//! Environment-driven configuration for the blend service.

use thiserror::Error;

use llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

pub const SCRAPER_API_KEY: &str = "SCRAPER_API_KEY";
pub const BASE_URL: &str = "BASE_URL";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Credentials and endpoints for both external services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendConfig {
    pub scraper_api_key: String,
    /// Content endpoint, queried as `{base_url}?handle=<identity>`
    pub base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Full chat completions URL
    pub openai_base_url: String,
}

impl BlendConfig {
    /// Read the configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any name -> value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));

        Ok(Self {
            scraper_api_key: require(SCRAPER_API_KEY)?,
            base_url: require(BASE_URL)?,
            openai_api_key: require(OPENAI_API_KEY)?,
            openai_model: get(OPENAI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: get(OPENAI_BASE_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}
