//! Error types shared by every stage of the blend pipeline.
//!
//! The taxonomy is deliberately small and stable: callers switch on
//! [`ErrorKind`] to pick a user-facing status, while the `Display` text of
//! [`BlendError`] carries the detail for logs.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The external collaborator an upstream failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// The content-retrieval API that resolves handles to posts
    Content,
    /// The generative text model
    Generation,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Content => f.write_str("content API"),
            Service::Generation => f.write_str("generation API"),
        }
    }
}

/// Errors that can abort a blend.
///
/// `Clone` is required because concurrent callers waiting on the same
/// in-flight fetch all receive the same outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlendError {
    /// Caller input was missing or empty
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    /// The handle does not resolve to an account
    #[error("handle @{identity} not found")]
    NotFound { identity: String },

    /// The handle resolved but produced no usable content
    #[error("unable to retrieve enough posts for @{identity}")]
    InsufficientData { identity: String },

    /// Upstream rejected our credential
    #[error("{service} authentication failed: {message}")]
    Auth { service: Service, message: String },

    /// Upstream is throttling us
    #[error("{service} rate limit exceeded, try again later")]
    RateLimited { service: Service },

    /// No response at all (DNS, TLS, connection reset, ...)
    #[error("no response from {service}: {message}")]
    Transport { service: Service, message: String },

    /// Any other non-success answer from upstream
    #[error("{service} error{}: {message}", describe_status(.status))]
    Upstream {
        service: Service,
        status: Option<u16>,
        message: String,
    },

    /// The model answered, but not with a usable analysis
    #[error("failed to parse generated analysis: {0}")]
    GenerationParse(String),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

impl BlendError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        BlendError::Validation {
            reason: reason.into(),
        }
    }

    /// Shorthand for a parse failure of the generated output
    pub fn parse(reason: impl Into<String>) -> Self {
        BlendError::GenerationParse(reason.into())
    }

    /// Classify this error into its stable kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlendError::Validation { .. } => ErrorKind::Validation,
            BlendError::NotFound { .. } => ErrorKind::NotFound,
            BlendError::InsufficientData { .. } => ErrorKind::InsufficientData,
            BlendError::Auth { .. } => ErrorKind::Auth,
            BlendError::RateLimited { .. } => ErrorKind::RateLimited,
            BlendError::Transport { .. } => ErrorKind::Transport,
            BlendError::Upstream { .. } => ErrorKind::Upstream,
            BlendError::GenerationParse(_) => ErrorKind::GenerationParse,
        }
    }
}

/// Stable error classification exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientData,
    Auth,
    RateLimited,
    Transport,
    Upstream,
    GenerationParse,
}

impl ErrorKind {
    /// Machine-readable name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InsufficientData => "insufficient_data",
            ErrorKind::Auth => "auth",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Transport => "transport",
            ErrorKind::Upstream => "upstream",
            ErrorKind::GenerationParse => "generation_parse",
        }
    }

    /// Suggested HTTP status for a caller that speaks HTTP
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::InsufficientData => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Auth => 401,
            ErrorKind::RateLimited => 429,
            ErrorKind::Transport | ErrorKind::Upstream => 502,
            ErrorKind::GenerationParse => 500,
        }
    }

    /// Whether the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::InsufficientData
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable error body handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

impl From<&BlendError> for ErrorResponse {
    fn from(err: &BlendError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Convenience type alias for Results across the workspace
pub type Result<T> = std::result::Result<T, BlendError>;
