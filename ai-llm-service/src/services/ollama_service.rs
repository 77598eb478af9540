//! Ollama client (`POST {endpoint}/api/generate` with `stream=false`).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{AiLlmError, ProviderError, ProviderErrorKind};
use crate::services::http;

#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl OllamaService {
    /// # Errors
    /// `InvalidProvider` for a non-Ollama config, or any validation error from
    /// [`LlmModelConfig::validate`].
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(LlmProvider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }
        cfg.validate()?;

        let client = http::client(cfg.timeout(), None)?;
        let url_generate = format!("{}/api/generate", cfg.base_url());

        info!(model = %cfg.model, url = %url_generate, "Ollama client ready");
        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Single-shot generation. `max_tokens` maps to Ollama's `num_predict`.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt,
            system,
            stream: false,
            options: SamplingOptions {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                num_predict: self.cfg.max_tokens,
            },
        };
        let out: GenerateResponse = http::post_json(
            &self.client,
            LlmProvider::Ollama,
            &self.url_generate,
            &body,
            self.cfg.timeout(),
        )
        .await?;
        Ok(out.response)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
