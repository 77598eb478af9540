//! Context builders: the interchangeable ways of turning a question into the
//! context block sent to the model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::cache::KnowledgeCache;
use crate::error::DataUnavailable;
use crate::select::{format_context, select};
use crate::terms::TermExtractor;

pub trait ContextBuilder: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn build_context(&self, question: &str) -> Result<String, DataUnavailable>;
}

/// Keyword-scored retrieval: extract terms, score, keep the top `k`.
pub struct KeywordContextBuilder {
    cache: Arc<KnowledgeCache>,
    extractor: TermExtractor,
    top_k: usize,
}

impl KeywordContextBuilder {
    pub fn new(cache: Arc<KnowledgeCache>, extractor: TermExtractor, top_k: usize) -> Self {
        Self {
            cache,
            extractor,
            top_k,
        }
    }
}

impl ContextBuilder for KeywordContextBuilder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn build_context(&self, question: &str) -> Result<String, DataUnavailable> {
        let terms = self.extractor.extract(question);
        let corpus = self.cache.corpus()?;
        debug!(terms = ?terms, "extracted query terms");
        let picked = select(&terms, &corpus.documents, &corpus.fallback, self.top_k);
        Ok(format_context(picked))
    }
}

/// Sends every document, in derivation order, regardless of the question.
pub struct FullContextBuilder {
    cache: Arc<KnowledgeCache>,
}

impl FullContextBuilder {
    pub fn new(cache: Arc<KnowledgeCache>) -> Self {
        Self { cache }
    }
}

impl ContextBuilder for FullContextBuilder {
    fn name(&self) -> &'static str {
        "full"
    }

    fn build_context(&self, _question: &str) -> Result<String, DataUnavailable> {
        Ok(format_context(self.cache.get_documents()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextStrategy {
    #[default]
    Keyword,
    Full,
}

impl FromStr for ContextStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown context strategy `{other}` (expected keyword|full)")),
        }
    }
}

impl fmt::Display for ContextStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyword => "keyword",
            Self::Full => "full",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{KnowledgeBase, KnowledgeSource};
    use crate::select::CONTEXT_DELIMITER;

    struct Inline(&'static str);

    impl KnowledgeSource for Inline {
        fn load(&self) -> Result<KnowledgeBase, DataUnavailable> {
            KnowledgeBase::from_json_str(self.0, "inline")
        }
    }

    const KB: &str = r#"{
        "name": "Acme", "founder": "Rita Moss", "co_founders": [],
        "mission": "Make integration boring", "tagline": "Glue", "story": "Garage.",
        "employees": [
            { "name": "Ana", "role": "Engineer", "expertise": "Rust" },
            { "name": "Leo", "role": "Designer", "expertise": "Figma" }
        ],
        "mission_areas": [{ "title": "Backend", "description": "We build APIs", "technologies": [] }],
        "contact": { "email": "hi@acme.io", "phone": "1", "address": "Main St" }
    }"#;

    fn cache() -> Arc<KnowledgeCache> {
        Arc::new(KnowledgeCache::new(Inline(KB)))
    }

    #[test]
    fn keyword_builder_picks_matching_document() {
        let b = KeywordContextBuilder::new(cache(), TermExtractor::default(), 5);
        let ctx = b.build_context("Tell me about Leo").unwrap();
        assert_eq!(ctx, "[employee]\nEmployee: Leo\nRole: Designer\nExpertise: Figma");
    }

    #[test]
    fn keyword_builder_falls_back() {
        let b = KeywordContextBuilder::new(cache(), TermExtractor::default(), 5);
        let ctx = b.build_context("").unwrap();
        assert_eq!(ctx, "[company_info]\nCompany: Acme\nMission: Make integration boring");
    }

    #[test]
    fn full_builder_includes_everything() {
        let b = FullContextBuilder::new(cache());
        let ctx = b.build_context("anything").unwrap();
        assert_eq!(ctx.matches(CONTEXT_DELIMITER).count(), 4);
        assert!(ctx.starts_with("[company_info]"));
        assert!(ctx.ends_with("Address: Main St"));
    }

    #[test]
    fn load_errors_propagate() {
        let b = FullContextBuilder::new(Arc::new(KnowledgeCache::new(Inline("[]"))));
        assert!(matches!(
            b.build_context("x"),
            Err(DataUnavailable::Malformed { .. })
        ));
    }

    #[test]
    fn strategy_parsing() {
        assert_eq!("Keyword".parse::<ContextStrategy>(), Ok(ContextStrategy::Keyword));
        assert_eq!(" full ".parse::<ContextStrategy>(), Ok(ContextStrategy::Full));
        assert!("vector".parse::<ContextStrategy>().is_err());
    }

    #[test]
    fn only_documented_strategy_names_parse() {
        for name in ["rag", "simple", "basic", ""] {
            let err = name.parse::<ContextStrategy>().unwrap_err();
            assert!(err.contains("expected keyword|full"), "{name:?}: {err}");
        }
        for s in [ContextStrategy::Keyword, ContextStrategy::Full] {
            assert_eq!(s.to_string().parse::<ContextStrategy>(), Ok(s));
        }
    }
}
