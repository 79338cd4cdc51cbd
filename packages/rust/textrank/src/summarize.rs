//! Extractive summarization over a sentence-similarity graph.

use std::collections::BTreeSet;

use tracing::debug;

use crate::normalize::normalize;
use crate::pagerank::{self, WeightedGraph};
use crate::sentences::split_sentences;
use crate::tokens::{is_content_word, tokenize};
use crate::RankOptions;

/// Summarize `text`, keeping roughly `ratio` of its sentences.
///
/// Sentences are chosen by centrality and emitted in document order. Text
/// with at most one sentence, or whose sentences share no content words,
/// comes back normalized but otherwise unchanged. Never fails.
pub fn summarize(text: &str, ratio: f64, opts: &RankOptions) -> String {
    let normalized = normalize(text);
    let sentences = split_sentences(&normalized);
    let n = sentences.len();

    if n <= 1 {
        return normalized;
    }

    let graph = similarity_graph(&sentences);
    if graph.edge_count() == 0 {
        debug!(sentences = n, "no overlapping sentences, returning text unchanged");
        return normalized;
    }

    let outcome = pagerank::rank(&graph, opts);
    let k = target_count(ratio, n);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        outcome.scores[b]
            .total_cmp(&outcome.scores[a])
            .then(a.cmp(&b))
    });

    let mut chosen: Vec<usize> = order.into_iter().take(k).collect();
    chosen.sort_unstable();

    let summary = chosen
        .iter()
        .map(|&i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ");

    if summary.is_empty() {
        return normalized;
    }
    capitalize_first(&summary)
}

/// Number of sentences in the normalized form of `text`.
pub fn sentence_count(text: &str) -> usize {
    split_sentences(&normalize(text)).len()
}

/// `max(1, round(ratio * n))`, clamped to `n`.
///
/// A ratio that is not a positive number selects one sentence; ratios above
/// one select everything.
pub fn target_count(ratio: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    if !(ratio > 0.0) {
        return 1;
    }
    let k = (ratio.min(1.0) * n as f64).round() as usize;
    k.clamp(1, n)
}

/// Edge weight = shared content words / (ln(1 + |Si|) + ln(1 + |Sj|)).
fn similarity_graph(sentences: &[&str]) -> WeightedGraph {
    let bags: Vec<(BTreeSet<String>, usize)> = sentences
        .iter()
        .map(|s| {
            let words: Vec<String> = tokenize(s)
                .into_iter()
                .map(|t| t.text)
                .filter(|w| is_content_word(w))
                .collect();
            let len = words.len();
            (words.into_iter().collect(), len)
        })
        .collect();

    let mut graph = WeightedGraph::new(sentences.len());
    for i in 0..bags.len() {
        for j in (i + 1)..bags.len() {
            let shared = bags[i].0.intersection(&bags[j].0).count();
            if shared == 0 {
                continue;
            }
            let norm = (1.0 + bags[i].1 as f64).ln() + (1.0 + bags[j].1 as f64).ln();
            graph.add_edge(i, j, shared as f64 / norm);
        }
    }
    graph
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
