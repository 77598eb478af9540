//! Process-lifetime cache of the knowledge base and its derived documents.
//!
//! The first successful load is stored and never refreshed. A failed load is
//! not stored, so a later call runs the loader again.

use std::sync::{Mutex, OnceLock};

use tracing::{debug, info};

use crate::documents::{RetrievableDocument, build_documents, fallback_document};
use crate::error::DataUnavailable;
use crate::kb::{KnowledgeBase, KnowledgeSource};

/// Everything derived from one load.
#[derive(Debug)]
pub struct Corpus {
    pub kb: KnowledgeBase,
    pub documents: Vec<RetrievableDocument>,
    pub fallback: RetrievableDocument,
}

impl Corpus {
    pub fn new(kb: KnowledgeBase) -> Self {
        let documents = build_documents(&kb);
        let fallback = fallback_document(&kb);
        Self {
            kb,
            documents,
            fallback,
        }
    }
}

/// Share it behind an `Arc`; reads after initialization take no lock.
pub struct KnowledgeCache {
    source: Box<dyn KnowledgeSource>,
    corpus: OnceLock<Corpus>,
    init: Mutex<()>,
}

impl KnowledgeCache {
    pub fn new(source: impl KnowledgeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            corpus: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Returns the cached corpus, loading it on first use.
    ///
    /// Concurrent first callers are serialized; the loader runs at most once
    /// on success.
    pub fn corpus(&self) -> Result<&Corpus, DataUnavailable> {
        if let Some(c) = self.corpus.get() {
            return Ok(c);
        }

        // A poisoned guard only means another loader panicked; the slot is still consistent.
        let _guard = self.init.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(c) = self.corpus.get() {
            return Ok(c);
        }

        debug!("knowledge cache cold, loading");
        let corpus = Corpus::new(self.source.load()?);
        info!(
            company = %corpus.kb.name,
            documents = corpus.documents.len(),
            "knowledge cache initialized"
        );
        Ok(self.corpus.get_or_init(|| corpus))
    }

    /// Derived documents in derivation order.
    pub fn get_documents(&self) -> Result<&[RetrievableDocument], DataUnavailable> {
        Ok(&self.corpus()?.documents)
    }
}
