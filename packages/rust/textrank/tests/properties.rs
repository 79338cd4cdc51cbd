//! Property tests for normalization, summarization and keyword extraction.

use proptest::prelude::*;
use regsum_textrank::{
    RankOptions, extract_keywords, normalize, sentence_count, split_sentences, summarize,
    target_count,
};

// =============================================================================
// STRATEGIES
// =============================================================================

const WORDS: &[&str] = &[
    "agency", "loan", "lender", "review", "program", "grant", "credit", "firm", "report",
    "collateral", "application", "business", "interest", "payment", "guaranty",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 3..8).prop_map(|words| {
        let mut s = words.join(" ");
        if let Some(first) = s.get(..1) {
            let upper = first.to_uppercase();
            s.replace_range(..1, &upper);
        }
        s.push('.');
        s
    })
}

fn document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), 0..8)
}

/// Two or more sentences that all mention "loan", so the similarity graph has edges.
fn connected_document() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), 2..8).prop_map(|sentences| {
        sentences
            .into_iter()
            .map(|s| format!("{} loan.", s.trim_end_matches('.')))
            .collect()
    })
}

/// Whether every summary sentence appears in the source, in source order.
fn is_ordered_subsequence(summary: &[&str], source: &[&str]) -> bool {
    let mut rest = source.iter();
    summary
        .iter()
        .all(|wanted| rest.by_ref().any(|candidate| candidate == wanted))
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9() .\n]{0,80}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_has_no_newlines_or_edge_whitespace(text in "[a-z0-9() .\n\t]{0,80}") {
        let out = normalize(&text);
        prop_assert!(!out.contains('\n'));
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn summary_is_ordered_subsequence_of_sentences(doc in document(), ratio in 0.05f64..1.0) {
        let text = doc.join(" ");
        let normalized = normalize(&text);
        let summary = summarize(&text, ratio, &RankOptions::default());

        if sentence_count(&text) <= 1 {
            prop_assert_eq!(summary, normalized);
        } else {
            let source = split_sentences(&normalized);
            let picked = split_sentences(&summary);
            prop_assert!(!picked.is_empty());
            prop_assert!(picked.len() <= source.len());
            prop_assert!(is_ordered_subsequence(&picked, &source));
        }
    }

    #[test]
    fn summary_keeps_exactly_the_target_count(doc in connected_document(), ratio in 0.0f64..1.5) {
        let text = doc.join(" ");
        let total = sentence_count(&text);
        let summary = summarize(&text, ratio, &RankOptions::default());

        prop_assert_eq!(total, doc.len());
        prop_assert_eq!(split_sentences(&summary).len(), target_count(ratio, total));
    }

    #[test]
    fn summary_is_deterministic(doc in document()) {
        let text = doc.join(" ");
        let opts = RankOptions::default();
        prop_assert_eq!(summarize(&text, 0.5, &opts), summarize(&text, 0.5, &opts));
    }

    #[test]
    fn keywords_are_lowercase_and_trimmed(doc in document()) {
        let text = doc.join(" ");
        for keyword in extract_keywords(&text, &RankOptions::default()) {
            prop_assert!(!keyword.term.is_empty());
            prop_assert_eq!(keyword.term.to_lowercase(), keyword.term.clone());
            prop_assert_eq!(keyword.term.trim(), keyword.term.as_str());
        }
    }
}
