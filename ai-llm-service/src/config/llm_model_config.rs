use std::time::Duration;

use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{ConfigError, Result};

/// Everything needed to talk to one chat model.
///
/// `endpoint` is the API base without a path (`https://api.openai.com`,
/// `http://localhost:11434`).
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(512),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS))
    }

    /// # Errors
    /// [`ConfigError::EmptyModel`], [`ConfigError::InvalidFormat`] for a
    /// non-http(s) endpoint, [`ConfigError::OutOfRange`] for sampling knobs.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidFormat {
                var: "endpoint",
                reason: "must start with http:// or https://",
            }
            .into());
        }
        check_range("temperature", self.temperature, 0.0..=2.0, "expected 0.0..=2.0")?;
        check_range("top_p", self.top_p, 0.0..=1.0, "expected 0.0..=1.0")?;
        Ok(())
    }

    /// Endpoint without trailing slashes.
    pub(crate) fn base_url(&self) -> String {
        self.endpoint.trim().trim_end_matches('/').to_string()
    }
}

fn check_range(
    field: &'static str,
    value: Option<f32>,
    range: std::ops::RangeInclusive<f32>,
    detail: &'static str,
) -> Result<()> {
    match value {
        Some(v) if !range.contains(&v) => Err(ConfigError::OutOfRange { field, detail }.into()),
        _ => Ok(()),
    }
}
