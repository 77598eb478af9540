//! FAQ agent: context builder + prompt + chat model.

use std::future::Future;
use std::sync::Arc;

use ai_llm_service::{AiLlmError, LlmService};
use tracing::{debug, info, instrument};

use crate::builder::ContextBuilder;
use crate::error::ContextorError;
use crate::prompt::{DEFAULT_SYSTEM, build_user_prompt};

/// Text-generation oracle the agent talks to.
pub trait ChatModel: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

impl ChatModel for LlmService {
    fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send {
        LlmService::generate(self, prompt, system)
    }
}

/// Answer together with the context that was sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqAnswer {
    pub answer: String,
    pub context: String,
}

pub struct FaqAgent<M> {
    builder: Arc<dyn ContextBuilder>,
    model: Arc<M>,
    system: String,
}

impl<M: ChatModel> FaqAgent<M> {
    pub fn new(builder: Arc<dyn ContextBuilder>, model: Arc<M>) -> Self {
        Self {
            builder,
            model,
            system: DEFAULT_SYSTEM.trim().to_string(),
        }
    }

    /// Overrides the default system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Builds the context for `question`, asks the model and returns both.
    ///
    /// # Errors
    /// [`ContextorError::EmptyQuestion`] for a blank question (the model is not
    /// called), [`ContextorError::DataUnavailable`] when the knowledge base
    /// cannot be loaded, [`ContextorError::Llm`] on model failures.
    #[instrument(skip_all, fields(builder = self.builder.name()))]
    pub async fn ask(&self, question: &str) -> Result<FaqAnswer, ContextorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ContextorError::EmptyQuestion);
        }

        let context = self.builder.build_context(question)?;
        debug!(context_chars = context.len(), "context built");

        let prompt = build_user_prompt(question, &context);
        let answer = self.model.generate(&prompt, Some(&self.system)).await?;
        info!(answer_chars = answer.len(), "question answered");

        Ok(FaqAnswer { answer, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataUnavailable;
    use std::sync::Mutex;

    struct FixedContext;

    impl ContextBuilder for FixedContext {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn build_context(&self, _question: &str) -> Result<String, DataUnavailable> {
            Ok("[contact]\nEmail: hi@acme.io".into())
        }
    }

    struct Broken;

    impl ContextBuilder for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn build_context(&self, _question: &str) -> Result<String, DataUnavailable> {
            Err(DataUnavailable::Invalid {
                origin: "test".into(),
                reason: "nope".into(),
            })
        }
    }

    #[derive(Default)]
    struct StubModel {
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ChatModel for StubModel {
        async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), system.map(str::to_string)));
            Ok("Write to hi@acme.io".into())
        }
    }

    #[tokio::test]
    async fn ask_sends_context_and_question() {
        let model = Arc::new(StubModel::default());
        let agent = FaqAgent::new(Arc::new(FixedContext), model.clone());

        let out = agent.ask("  How do I reach you?  ").await.unwrap();
        assert_eq!(out.answer, "Write to hi@acme.io");
        assert_eq!(out.context, "[contact]\nEmail: hi@acme.io");

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("Email: hi@acme.io"));
        assert!(seen[0].0.ends_with("How do I reach you?"));
        assert_eq!(seen[0].1.as_deref(), Some(DEFAULT_SYSTEM.trim()));
    }

    #[tokio::test]
    async fn blank_question_skips_model() {
        let model = Arc::new(StubModel::default());
        let agent = FaqAgent::new(Arc::new(FixedContext), model.clone());

        assert!(matches!(agent.ask(" \n ").await, Err(ContextorError::EmptyQuestion)));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn data_errors_skip_model() {
        let model = Arc::new(StubModel::default());
        let agent = FaqAgent::new(Arc::new(Broken), model.clone()).with_system("custom");

        assert!(matches!(
            agent.ask("hello").await,
            Err(ContextorError::DataUnavailable(_))
        ));
        assert!(model.seen.lock().unwrap().is_empty());
    }
}
