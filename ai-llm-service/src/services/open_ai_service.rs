//! OpenAI-compatible chat client (`POST {endpoint}/v1/chat/completions`, non-streaming).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{AiLlmError, ProviderError, ProviderErrorKind};
use crate::services::http;

#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// # Errors
    /// `InvalidProvider` for a non-OpenAI config, `MissingApiKey` without a key,
    /// any validation error from [`LlmModelConfig::validate`].
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::OpenAI {
            return Err(
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::InvalidProvider).into(),
            );
        }
        cfg.validate()?;

        let key = cfg.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey)
        })?;
        let client = http::client(cfg.timeout(), Some(http::bearer(LlmProvider::OpenAI, key)?))?;
        let url_chat = format!("{}/v1/chat/completions", cfg.base_url());

        info!(model = %cfg.model, url = %url_chat, "OpenAI client ready");
        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// One chat completion: optional system message, then the user prompt.
    ///
    /// # Errors
    /// Transport/timeout failures, non-2xx status, undecodable body, or
    /// `EmptyChoices` when no choice carries text.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let body = ChatRequest::new(&self.cfg, prompt, system);
        let out: ChatResponse = http::post_json(
            &self.client,
            LlmProvider::OpenAI,
            &self.url_chat,
            &body,
            self.cfg.timeout(),
        )
        .await?;

        first_content(out).ok_or_else(|| {
            AiLlmError::from(ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::EmptyChoices,
            ))
        })
    }
}

fn first_content(resp: ChatResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .find(|text| !text.trim().is_empty())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    fn new(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let messages = system
            .map(|content| Message {
                role: "system",
                content,
            })
            .into_iter()
            .chain(std::iter::once(Message {
                role: "user",
                content: prompt,
            }))
            .collect();

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: Some(0.25),
            top_p: None,
            timeout_secs: Some(10),
        }
    }

    #[test]
    fn system_message_goes_first() {
        let c = cfg();
        let req = ChatRequest::new(&c, "When was Acme founded?", Some("Use context."));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "Use context." },
                    { "role": "user", "content": "When was Acme founded?" }
                ],
                "temperature": 0.25
            })
        );
    }

    #[test]
    fn without_system_only_user_message_is_sent() {
        let c = cfg();
        let req = ChatRequest::new(&c, "hi", None);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let mut c = cfg();
        c.api_key = None;
        assert!(matches!(
            OpenAiService::new(c).unwrap_err(),
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            })
        ));
    }

    #[test]
    fn skips_choices_without_text() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [
                { "message": { "content": null } },
                { "message": { "content": "  " } },
                { "message": { "content": "Acme was founded in 2019." } }
            ]
        }))
        .unwrap();
        assert_eq!(first_content(resp).as_deref(), Some("Acme was founded in 2019."));
    }

    #[test]
    fn missing_choices_yield_none() {
        let resp: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(first_content(resp).is_none());
    }
}
