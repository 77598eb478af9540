//! Typed errors for the faq-context crate.

use std::path::PathBuf;

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// The knowledge base could not be produced. Fatal for any call that needs it.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// Source missing or unreadable.
    #[error("cannot read knowledge base {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not a well-formed company record (bad JSON or missing fields).
    #[error("knowledge base {origin} is malformed: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record parsed but violates a required invariant (e.g. empty company name).
    #[error("knowledge base {origin} is invalid: {reason}")]
    Invalid { origin: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ContextorError {
    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailable),

    /// Errors from the chat model collaborator.
    #[error("LLM error: {0}")]
    Llm(#[from] AiLlmError),

    /// Invalid env-driven configuration.
    #[error("config error: {0}")]
    Config(String),

    #[error("question must not be empty")]
    EmptyQuestion,
}
