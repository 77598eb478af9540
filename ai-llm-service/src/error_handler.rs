//! Errors for `ai-llm-service` and the env helpers that produce them.
//!
//! [`AiLlmError`] is the only error returned across the crate boundary; it wraps
//! [`ConfigError`] (startup) and [`ProviderError`] (runtime). Every message is
//! tagged `[AI LLM Service]` so it is easy to attribute in mixed logs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

pub type Result<T> = std::result::Result<T, AiLlmError>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("[AI LLM Service] request timed out after {0:?}")]
    Timeout(Duration),
}

/// Turns `reqwest` timeouts into [`AiLlmError::Timeout`]; everything else is transport.
pub fn transport_error(err: reqwest::Error, timeout: Duration) -> AiLlmError {
    if err.is_timeout() {
        AiLlmError::Timeout(timeout)
    } else {
        AiLlmError::HttpTransport(err)
    }
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Unknown `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/// Non-2xx upstream response.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// See [`make_snippet`].
    pub snippet: String,
}

#[derive(Debug, Clone)]
pub enum ProviderErrorKind {
    /// Client built from a config that names another provider.
    InvalidProvider,
    MissingApiKey,
    HttpStatus(HttpError),
    Decode(String),
    /// Chat completion without any choice carrying text.
    EmptyChoices,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProvider => f.write_str("config targets another provider"),
            Self::MissingApiKey => f.write_str("missing API key"),
            Self::HttpStatus(h) => write!(f, "HTTP {} from {}: {}", h.status, h.url, h.snippet),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::EmptyChoices => f.write_str("response contained no choices"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

const SNIPPET_CHARS: usize = 240;

/// First 240 chars of an upstream body on one line, for logs and errors.
pub fn make_snippet(body: &str) -> String {
    let one_line: String = body
        .chars()
        .take(SNIPPET_CHARS)
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();
    one_line.trim().to_string()
}

/// Required, non-blank variable.
pub fn must_env(name: &'static str) -> Result<String> {
    non_blank(name).ok_or_else(|| AiLlmError::from(ConfigError::MissingVar(name)))
}

/// Variable value, or `default` when unset or blank.
pub fn env_or(name: &str, default: &str) -> String {
    non_blank(name).unwrap_or_else(|| default.to_string())
}

/// Optional parsed variable; `Ok(None)` when unset or blank.
///
/// # Errors
/// [`ConfigError::InvalidNumber`] when set but unparsable as `T`.
pub fn env_parse<T: FromStr>(name: &'static str, reason: &'static str) -> Result<Option<T>> {
    non_blank(name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| AiLlmError::from(ConfigError::InvalidNumber { var: name, reason }))
        })
        .transpose()
}

fn non_blank(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
