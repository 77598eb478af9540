use std::io::{BufRead, BufReader};
use std::sync::Arc;

use ai_llm_service::{LlmService, telemetry};
use anyhow::Context;
use faq_context::{
    ChatModel, ContextorConfig, ContextorError, FaqAgent, JsonFileSource, KnowledgeCache,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{Level, error, info};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional: variables may come from the real environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("failed to read .env");
        }
    }

    init_tracing();

    let cfg = ContextorConfig::from_env()?;
    info!(
        path = %cfg.knowledge_path.display(),
        strategy = %cfg.strategy,
        top_k = cfg.top_k,
        "context config loaded"
    );

    // Warm the cache so a broken knowledge base stops the process here.
    let cache = Arc::new(KnowledgeCache::new(JsonFileSource::new(&cfg.knowledge_path)));
    let corpus = cache.corpus()?;
    info!(company = %corpus.kb.name, documents = corpus.documents.len(), "knowledge base ready");

    let llm = Arc::new(LlmService::from_env().context("failed to configure LLM")?);
    // Logged by the service itself; a failed probe is not fatal.
    llm.health().await;

    let agent = FaqAgent::new(cfg.make_builder(cache), llm);
    let lines = spawn_line_reader(BufReader::new(std::io::stdin()))?;
    let mut out = tokio::io::stdout();

    tokio::select! {
        res = question_loop(&agent, lines, &mut out) => res?,
        _ = shutdown_signal() => info!("shutdown requested"),
    }

    Ok(())
}

/// Reads lines on a plain OS thread and forwards them over a channel.
///
/// A blocked read never holds up runtime shutdown; the thread ends at EOF,
/// on a read error, or once the receiver is dropped.
fn spawn_line_reader<R>(reader: R) -> std::io::Result<mpsc::Receiver<std::io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Answers one question per line and writes each answer to `out`.
async fn question_loop<M, W>(
    agent: &FaqAgent<M>,
    mut lines: mpsc::Receiver<std::io::Result<String>>,
    out: &mut W,
) -> anyhow::Result<()>
where
    M: ChatModel,
    W: AsyncWrite + Unpin,
{
    out.write_all(b"Ask a question about the company (Ctrl+D to quit).\n> ").await?;
    out.flush().await?;

    while let Some(line) = lines.recv().await {
        let line = line.context("failed to read stdin")?;
        match agent.ask(&line).await {
            Ok(qa) => out.write_all(format!("{}\n", qa.answer.trim()).as_bytes()).await?,
            Err(ContextorError::EmptyQuestion) => {}
            Err(ContextorError::Llm(e)) => {
                error!(error = %e, "model call failed");
                out.write_all(b"Sorry, the assistant is unavailable right now.\n").await?;
            }
            Err(e) => return Err(e.into()),
        }
        out.write_all(b"> ").await?;
        out.flush().await?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = telemetry::env_filter_with_level("info", Level::INFO);

    // Library events go through the library's own layer.
    let app_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(filter::filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .init();
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
