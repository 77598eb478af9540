//! Term-presence scoring.

use std::collections::BTreeSet;

use crate::documents::RetrievableDocument;

/// A document paired with its score for one question.
#[derive(Debug, Clone, Copy)]
pub struct ScoredDocument<'a> {
    pub doc: &'a RetrievableDocument,
    pub score: usize,
}

/// Counts the terms that occur as a case-insensitive substring of the content.
/// Not whole-word: `"api"` matches `"APIs"`.
pub fn score(terms: &BTreeSet<String>, doc: &RetrievableDocument) -> usize {
    let hay = doc.haystack();
    terms.iter().filter(|t| hay.contains(t.as_str())).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::DocumentKind;

    fn doc(text: &str) -> RetrievableDocument {
        RetrievableDocument::new(DocumentKind::Mission, text.to_string(), None)
    }

    fn terms(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substring_presence_counts_once_per_term() {
        let d = doc("We build APIs. APIs everywhere.");
        assert_eq!(score(&terms(&["api"]), &d), 1);
        assert_eq!(score(&terms(&["api", "build", "nope"]), &d), 2);
    }

    #[test]
    fn range_is_zero_to_term_count() {
        let d = doc("Rust and Postgres");
        assert_eq!(score(&terms(&[]), &d), 0);
        let t = terms(&["rust", "postgres"]);
        assert_eq!(score(&t, &d), t.len());
    }

    #[test]
    fn adding_terms_never_lowers_a_score() {
        let d = doc("Employee: Ana\nRole: Engineer");
        let small = terms(&["ana"]);
        let big = terms(&["ana", "engineer", "zzz"]);
        assert!(score(&big, &d) >= score(&small, &d));
    }

    #[test]
    fn document_matching_a_superset_of_terms_scores_at_least_as_high() {
        let t = terms(&["ana", "engineer", "rust"]);
        let richer = doc("Employee: Ana\nRole: Engineer\nExpertise: Rust");
        let poorer = doc("Employee: Ana\nRole: Designer");

        let matched = |d: &RetrievableDocument| -> BTreeSet<String> {
            t.iter().filter(|x| d.haystack().contains(x.as_str())).cloned().collect()
        };
        assert!(matched(&poorer).is_subset(&matched(&richer)));
        assert_eq!(score(&t, &richer), 3);
        assert_eq!(score(&t, &poorer), 1);
        assert!(score(&t, &richer) >= score(&t, &poorer));
    }
}
