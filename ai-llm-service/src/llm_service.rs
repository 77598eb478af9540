//! Shared chat service over the configured provider.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Holds a single provider client built from [`LlmModelConfig`].

use tracing::info;

use crate::{
    config::{default_config::config_from_env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

/// Chat model facade used by the FAQ agent.
pub struct LlmService {
    cfg: LlmModelConfig,
    backend: Backend,
    health: HealthService,
}

impl LlmService {
    /// Builds the provider client for `cfg`.
    ///
    /// # Errors
    /// Config validation or provider construction failures.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;
        let backend = match cfg.provider {
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg.clone())?),
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg.clone())?),
        };
        info!(provider = %cfg.provider, model = %cfg.model, "LlmService ready");
        Ok(Self {
            health: HealthService::new(None)?,
            cfg,
            backend,
        })
    }

    /// Same as [`LlmService::new`] with the config read from env (see [`config_from_env`]).
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_from_env()?)
    }

    /// Generates a completion for `prompt` with an optional system instruction.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match &self.backend {
            Backend::Ollama(cli) => cli.generate(prompt, system).await,
            Backend::OpenAI(cli) => cli.generate(prompt, system).await,
        }
    }

    /// Probes the backend; never fails.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.cfg).await
    }

    /// Active model config.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ConfigError;

    fn ollama() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn selects_backend_from_provider() {
        let svc = LlmService::new(ollama()).unwrap();
        assert!(matches!(svc.backend, Backend::Ollama(_)));
        assert_eq!(svc.config().model, "qwen3:14b");
    }

    #[test]
    fn invalid_config_fails_before_client_is_built() {
        let mut cfg = ollama();
        cfg.temperature = Some(3.0);
        assert!(matches!(
            LlmService::new(cfg),
            Err(AiLlmError::Config(ConfigError::OutOfRange { field: "temperature", .. }))
        ));
    }
}
