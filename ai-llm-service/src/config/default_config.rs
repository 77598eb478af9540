//! Chat model config read from the environment.
//!
//! | Var | Default | Notes |
//! |---|---|---|
//! | `LLM_KIND` | `openai` | `openai` / `chatgpt` / `ollama` |
//! | `LLM_MAX_TOKENS` | unset | u32 |
//! | `LLM_TEMPERATURE` | `0.2` | 0.0..=2.0 |
//! | `LLM_TIMEOUT_SECS` | `60` | |
//! | `OPENAI_API_KEY` | — | required for OpenAI |
//! | `OPENAI_MODEL` | `gpt-4o-mini` | |
//! | `OPENAI_BASE_URL` | `https://api.openai.com` | |
//! | `OLLAMA_URL` / `OLLAMA_PORT` | — | one is required for Ollama; URL wins |
//! | `OLLAMA_MODEL` | — | required for Ollama |

use tracing::debug;

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{AiLlmError, ConfigError, env_or, env_parse, must_env};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Builds and validates the config for the provider named in `LLM_KIND`.
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for an unknown kind, missing/invalid
/// variables, or a config that fails [`LlmModelConfig::validate`].
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let provider: LlmProvider = env_or("LLM_KIND", "openai").parse()?;
    let cfg = match provider {
        LlmProvider::OpenAI => config_openai()?,
        LlmProvider::Ollama => config_ollama()?,
    };
    cfg.validate()?;
    debug!(%provider, model = %cfg.model, endpoint = %cfg.endpoint, "chat model config resolved");
    Ok(cfg)
}

pub fn config_openai() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    with_sampling(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        endpoint: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: None,
    })
}

pub fn config_ollama() -> Result<LlmModelConfig, AiLlmError> {
    let model = must_env("OLLAMA_MODEL")?;
    with_sampling(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: None,
    })
}

/// Fills the provider-independent knobs.
fn with_sampling(mut cfg: LlmModelConfig) -> Result<LlmModelConfig, AiLlmError> {
    cfg.max_tokens = env_parse("LLM_MAX_TOKENS", "expected u32")?;
    cfg.temperature = Some(
        env_parse("LLM_TEMPERATURE", "expected a decimal number")?.unwrap_or(DEFAULT_TEMPERATURE),
    );
    cfg.timeout_secs = env_parse("LLM_TIMEOUT_SECS", "expected whole seconds")?;
    Ok(cfg)
}

fn ollama_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("OLLAMA_URL", "");
    if !url.is_empty() {
        return Ok(url);
    }
    match env_parse::<u16>("OLLAMA_PORT", "expected u16 (1..=65535)")? {
        Some(port) => Ok(format!("http://localhost:{port}")),
        None => Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into()),
    }
}
