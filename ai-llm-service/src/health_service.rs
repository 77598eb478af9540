//! Startup health probe for the configured chat backend.
//!
//! - Ollama: `GET {endpoint}/api/tags`, model must be listed.
//! - OpenAI: `GET {endpoint}/v1/models` with bearer auth, model must be listed.
//!
//! [`HealthService::check`] never fails; problems come back as `ok = false`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, ProviderError, ProviderErrorKind};
use crate::services::http;

const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Health snapshot for one provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    /// Short human-readable detail.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: cfg.provider.to_string(),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

pub struct HealthService {
    client: reqwest::Client,
    timeout: Duration,
}

impl HealthService {
    /// `timeout_secs` defaults to 10 seconds.
    ///
    /// # Errors
    /// [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS));
        Ok(Self {
            client: http::client(timeout, None)?,
            timeout,
        })
    }

    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        if let Err(e) = cfg.validate() {
            warn!(provider = %cfg.provider, endpoint = %cfg.endpoint, error = %e, "health probe skipped");
            return HealthStatus::new(cfg, false, 0, e.to_string());
        }

        let started = Instant::now();
        let listed = match cfg.provider {
            LlmProvider::Ollama => self.list_ollama_models(cfg).await,
            LlmProvider::OpenAI => self.list_openai_models(cfg).await,
        };
        let latency_ms = started.elapsed().as_millis();

        let status = match listed {
            Ok(models) if models.iter().any(|m| m == &cfg.model) => {
                HealthStatus::new(cfg, true, latency_ms, "backend is up; model is available")
            }
            Ok(_) => HealthStatus::new(cfg, false, latency_ms, "backend is up, but model is not listed"),
            Err(e) => HealthStatus::new(cfg, false, latency_ms, e.to_string()),
        };

        if status.ok {
            info!(provider = %status.provider, model = %status.model, latency_ms, "health probe ok");
        } else {
            warn!(
                provider = %status.provider,
                endpoint = %status.endpoint,
                latency_ms,
                message = %status.message,
                "health probe failed"
            );
        }
        status
    }

    async fn list_ollama_models(&self, cfg: &LlmModelConfig) -> Result<Vec<String>, AiLlmError> {
        #[derive(Deserialize)]
        struct Tags {
            #[serde(default)]
            models: Vec<Tag>,
        }
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }

        let url = format!("{}/api/tags", cfg.base_url());
        let body = http::get_text(&self.client, cfg.provider, &url, self.timeout).await?;
        let tags: Tags = decode(cfg.provider, &url, &body)?;
        Ok(tags.models.into_iter().map(|t| t.name).collect())
    }

    async fn list_openai_models(&self, cfg: &LlmModelConfig) -> Result<Vec<String>, AiLlmError> {
        #[derive(Deserialize)]
        struct Models {
            data: Vec<Model>,
        }
        #[derive(Deserialize)]
        struct Model {
            id: String,
        }

        let key = cfg.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey)
        })?;
        // Auth differs per config, so it goes on a per-probe client.
        let client = http::client(self.timeout, Some(http::bearer(cfg.provider, key)?))?;

        let url = format!("{}/v1/models", cfg.base_url());
        let body = http::get_text(&client, cfg.provider, &url, self.timeout).await?;
        let models: Models = decode(cfg.provider, &url, &body)?;
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    provider: LlmProvider,
    url: &str,
    body: &str,
) -> Result<T, AiLlmError> {
    serde_json::from_str(body).map_err(|e| {
        AiLlmError::from(ProviderError::new(
            provider,
            ProviderErrorKind::Decode(format!("{url}: {e}")),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint: endpoint.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }

    #[tokio::test]
    async fn invalid_endpoint_is_reported_without_network() {
        let svc = HealthService::new(Some(1)).unwrap();
        let status = svc.check(&cfg("localhost:11434")).await;
        assert!(!status.ok);
        assert_eq!(status.provider, "Ollama");
        assert_eq!(status.latency_ms, 0);
    }

    #[tokio::test]
    async fn openai_probe_without_key_fails_softly() {
        let svc = HealthService::new(Some(1)).unwrap();
        let mut c = cfg("https://api.openai.com");
        c.provider = LlmProvider::OpenAI;
        let status = svc.check(&c).await;
        assert!(!status.ok);
        assert!(status.message.contains("missing API key"));
    }
}
