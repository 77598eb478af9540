//! Chat LLM client used by the FAQ backend to turn a prompt into an answer.
//!
//! - [`LlmService`] is constructed once, wrapped in `Arc` and shared.
//! - Providers: OpenAI-compatible (`/v1/chat/completions`) and Ollama (`/api/generate`).
//! - [`HealthService`] probes the configured backend for a startup report.
//! - [`telemetry`] exposes a crate-scoped `tracing` layer for binaries.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::config_from_env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use health_service::{HealthService, HealthStatus};
pub use llm_service::LlmService;
