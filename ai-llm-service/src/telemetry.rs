//! `tracing` layer for binaries that embed this crate.
//!
//! ```no_run
//! use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
//!
//! tracing_subscriber::registry()
//!     .with(ai_llm_service::telemetry::env_filter_with_level("info", tracing::Level::DEBUG))
//!     .with(ai_llm_service::telemetry::layer())
//!     .init();
//! ```

use std::io::IsTerminal;

use tracing::{Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix of every event emitted by this crate.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// `2025-09-12T10:20:30Z`
#[derive(Clone, Copy, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&now)
    }
}

/// Compact single-line layer that renders only this crate's events, with
/// `file:line` and span-close timings for provider calls.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let format = fmt::format()
        .compact()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .event_format(format)
        .with_filter(filter::filter_fn(|meta| {
            meta.target().starts_with(TARGET_PREFIX)
        }))
}

/// `ai_llm_service=<level>`.
pub fn level_directive(level: Level) -> Directive {
    format!("{TARGET_PREFIX}={}", level.as_str().to_ascii_lowercase())
        .parse()
        .unwrap_or_else(|_| LevelFilter::from_level(level).into())
}

/// `RUST_LOG` when it is set and valid; otherwise `default` plus `level` for
/// this crate.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), default, level)
}

/// An explicit `rust_log` is taken as-is, so `RUST_LOG=warn` silences this
/// crate's info lines too.
fn filter_from(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    if let Some(spec) = rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(spec) {
            return filter;
        }
    }
    EnvFilter::new(default).add_directive(level_directive(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        assert_eq!(level_directive(Level::DEBUG).to_string(), "ai_llm_service=debug");
        assert_eq!(level_directive(Level::WARN).to_string(), "ai_llm_service=warn");
    }

    #[test]
    fn explicit_rust_log_is_not_widened() {
        let filter = filter_from(Some("warn"), "info", Level::INFO).to_string();
        assert_eq!(filter, "warn");
        assert!(!filter.contains(TARGET_PREFIX));
    }

    #[test]
    fn default_adds_crate_level() {
        for unset in [None, Some(""), Some("  ")] {
            let filter = filter_from(unset, "info", Level::DEBUG).to_string();
            assert!(filter.contains("ai_llm_service=debug"), "{unset:?} -> {filter}");
            assert!(filter.contains("info"), "{filter}");
        }
    }

    #[test]
    fn invalid_rust_log_falls_back_to_default() {
        let filter = filter_from(Some("ai_llm_service=loud"), "warn", Level::INFO).to_string();
        assert!(filter.contains("ai_llm_service=info"), "{filter}");
    }
}
