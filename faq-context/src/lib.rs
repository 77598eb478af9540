//! Keyword-scored context building for a company FAQ, plus the agent that
//! forwards the context to a chat model.
//!
//! Flow: question → [`terms::extract_terms`] → [`KnowledgeCache::get_documents`]
//! → [`select::select`] → [`select::format_context`] → [`FaqAgent::ask`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use faq_context::{ContextorConfig, FaqAgent, JsonFileSource, KnowledgeCache};
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ContextorConfig::from_env()?;
//! let cache = Arc::new(KnowledgeCache::new(JsonFileSource::new(&cfg.knowledge_path)));
//! let llm = Arc::new(ai_llm_service::LlmService::from_env()?);
//! let agent = FaqAgent::new(cfg.make_builder(cache), llm);
//! println!("{}", agent.ask("What does Ana do?").await?.answer);
//! # Ok(()) }
//! ```

pub mod agent;
pub mod builder;
pub mod cache;
pub mod cfg;
pub mod documents;
pub mod error;
pub mod kb;
pub mod prompt;
pub mod score;
pub mod select;
pub mod terms;

pub use agent::{ChatModel, FaqAgent, FaqAnswer};
pub use builder::{ContextBuilder, ContextStrategy, FullContextBuilder, KeywordContextBuilder};
pub use cache::{Corpus, KnowledgeCache};
pub use cfg::ContextorConfig;
pub use documents::{DocumentKind, RetrievableDocument, build_documents, fallback_document};
pub use error::{ContextorError, DataUnavailable};
pub use kb::{Contact, Employee, JsonFileSource, KnowledgeBase, KnowledgeSource, MissionArea};
pub use score::{ScoredDocument, score};
pub use select::{CONTEXT_DELIMITER, DEFAULT_TOP_K, format_context, rank, select};
pub use terms::{STOP_WORDS, TermExtractor, extract_terms};
