//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::{ContextBuilder, ContextStrategy, FullContextBuilder, KeywordContextBuilder};
use crate::cache::KnowledgeCache;
use crate::error::ContextorError;
use crate::select::DEFAULT_TOP_K;
use crate::terms::TermExtractor;

pub const DEFAULT_KNOWLEDGE_PATH: &str = "data/company_info.json";

/// Config bag for context building. All fields have defaults via `from_env`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextorConfig {
    pub knowledge_path: PathBuf,
    pub strategy: ContextStrategy,
    pub top_k: usize,
    /// `None` keeps the built-in stop-words.
    pub stop_words: Option<Vec<String>>,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
            strategy: ContextStrategy::Keyword,
            top_k: DEFAULT_TOP_K,
            stop_words: None,
        }
    }
}

impl ContextorConfig {
    /// Reads `COMPANY_INFO_PATH`, `CONTEXT_STRATEGY`, `CONTEXT_TOP_K` and
    /// `CONTEXT_STOP_WORDS`.
    ///
    /// # Errors
    /// [`ContextorError::Config`] on an unknown strategy or a non-positive top-K.
    pub fn from_env() -> Result<Self, ContextorError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`ContextorConfig::from_env`] over an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ContextorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(p) = non_blank(get("COMPANY_INFO_PATH")) {
            cfg.knowledge_path = PathBuf::from(p);
        }
        if let Some(s) = non_blank(get("CONTEXT_STRATEGY")) {
            cfg.strategy = s.parse().map_err(ContextorError::Config)?;
        }
        if let Some(s) = non_blank(get("CONTEXT_TOP_K")) {
            cfg.top_k = match s.trim().parse::<usize>() {
                Ok(0) => return Err(ContextorError::Config("CONTEXT_TOP_K must be >= 1".into())),
                Ok(k) => k,
                Err(e) => {
                    return Err(ContextorError::Config(format!(
                        "CONTEXT_TOP_K=`{s}` is not a number: {e}"
                    )));
                }
            };
        }
        if let Some(s) = get("CONTEXT_STOP_WORDS") {
            cfg.stop_words = Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        Ok(cfg)
    }

    pub fn term_extractor(&self) -> TermExtractor {
        match &self.stop_words {
            Some(words) => TermExtractor::with_stop_words(words),
            None => TermExtractor::default(),
        }
    }

    /// Builds the configured [`ContextBuilder`] over a shared cache.
    pub fn make_builder(&self, cache: Arc<KnowledgeCache>) -> Arc<dyn ContextBuilder> {
        match self.strategy {
            ContextStrategy::Keyword => Arc::new(KeywordContextBuilder::new(
                cache,
                self.term_extractor(),
                self.top_k,
            )),
            ContextStrategy::Full => Arc::new(FullContextBuilder::new(cache)),
        }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = ContextorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ContextorConfig::default());
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.knowledge_path, PathBuf::from("data/company_info.json"));
    }

    #[test]
    fn reads_all_knobs() {
        let cfg = ContextorConfig::from_lookup(lookup(&[
            ("COMPANY_INFO_PATH", "/srv/kb.json"),
            ("CONTEXT_STRATEGY", "full"),
            ("CONTEXT_TOP_K", "3"),
            ("CONTEXT_STOP_WORDS", "rust, , acme"),
        ]))
        .unwrap();
        assert_eq!(cfg.knowledge_path, PathBuf::from("/srv/kb.json"));
        assert_eq!(cfg.strategy, ContextStrategy::Full);
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.stop_words, Some(vec!["rust".into(), "acme".into()]));
        assert!(cfg.term_extractor().extract("rust acme stack").contains("stack"));
    }

    #[test]
    fn rejects_zero_and_garbage_top_k() {
        for bad in ["0", "five", "-1"] {
            let err = ContextorConfig::from_lookup(lookup(&[("CONTEXT_TOP_K", bad)])).unwrap_err();
            assert!(matches!(err, ContextorError::Config(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err =
            ContextorConfig::from_lookup(lookup(&[("CONTEXT_STRATEGY", "vector")])).unwrap_err();
        assert!(err.to_string().contains("vector"));
    }
}
