//! Ranking, top-K cutoff, zero-match fallback and context rendering.

use std::collections::BTreeSet;

use tracing::debug;

use crate::documents::RetrievableDocument;
use crate::score::{ScoredDocument, score};

/// Separates documents in the rendered context block.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Default selector cutoff.
pub const DEFAULT_TOP_K: usize = 5;

/// Scores every document, drops zero scores and sorts by score descending.
///
/// The sort is stable, so derivation order breaks ties.
pub fn rank<'a>(
    terms: &BTreeSet<String>,
    docs: &'a [RetrievableDocument],
) -> Vec<ScoredDocument<'a>> {
    let mut scored: Vec<ScoredDocument<'a>> = docs
        .iter()
        .map(|doc| ScoredDocument {
            doc,
            score: score(terms, doc),
        })
        .filter(|s| s.score > 0)
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Picks at most `k` documents for `terms` (a `k` of 0 is treated as 1).
///
/// Never empty: when nothing matches, returns `fallback` alone.
pub fn select<'a>(
    terms: &BTreeSet<String>,
    docs: &'a [RetrievableDocument],
    fallback: &'a RetrievableDocument,
    k: usize,
) -> Vec<&'a RetrievableDocument> {
    let mut ranked = rank(terms, docs);
    if ranked.is_empty() {
        debug!(terms = terms.len(), "no document matched, using fallback");
        return vec![fallback];
    }
    ranked.truncate(k.max(1));
    debug!(
        terms = terms.len(),
        selected = ranked.len(),
        top_score = ranked[0].score,
        "documents selected"
    );
    ranked.into_iter().map(|s| s.doc).collect()
}

/// Renders `[kind]\ncontent` blocks joined by [`CONTEXT_DELIMITER`], in order.
pub fn format_context<'a, I>(docs: I) -> String
where
    I: IntoIterator<Item = &'a RetrievableDocument>,
{
    docs.into_iter()
        .map(|d| format!("[{}]\n{}", d.kind(), d.content()))
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}
