//! Keyword extraction over a word co-occurrence graph.
//!
//! Content words become nodes; words within `keyword_window` positions of
//! each other in the content-word stream share an edge weighted by how often
//! they co-occur. After ranking, the top share of terms is kept and any run
//! of kept terms that sit next to each other in the source (no punctuation
//! between them) is merged into a phrase scored by the mean of its terms.
//! A mean never exceeds its best term, so a phrase cannot outrank a single
//! term that scored above all its members.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::normalize::normalize;
use crate::pagerank::{self, WeightedGraph};
use crate::tokens::{Token, is_content_word, tokenize};
use crate::RankOptions;

/// A ranked keyword or keyword phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTerm {
    /// Lowercase term; multi-word phrases are joined by single spaces.
    pub term: String,
    /// Mean centrality of the constituent words.
    pub score: f64,
}

/// The single most central term or phrase, or an empty string.
pub fn extract_keyword(text: &str, opts: &RankOptions) -> String {
    extract_keywords(text, opts)
        .into_iter()
        .next()
        .map(|ranked| ranked.term)
        .unwrap_or_default()
}

/// All keyword candidates, best first.
///
/// Ties go to the shorter candidate, then to the one that appears first.
pub fn extract_keywords(text: &str, opts: &RankOptions) -> Vec<RankedTerm> {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);

    // Node ids in first-appearance order.
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut terms: Vec<&str> = Vec::new();
    let mut stream: Vec<usize> = Vec::new();
    for token in &tokens {
        if !is_content_word(&token.text) {
            continue;
        }
        let id = *ids.entry(token.text.as_str()).or_insert_with(|| {
            terms.push(token.text.as_str());
            terms.len() - 1
        });
        stream.push(id);
    }

    if stream.is_empty() {
        trace!("no content words, empty keyword");
        return Vec::new();
    }

    let window = opts.keyword_window.max(2);
    let mut graph = WeightedGraph::new(terms.len());
    for (pos, &a) in stream.iter().enumerate() {
        for &b in stream.iter().skip(pos + 1).take(window - 1) {
            graph.add_edge(a, b, 1.0);
        }
    }

    if graph.edge_count() == 0 {
        trace!(terms = terms.len(), "no co-occurrences, empty keyword");
        return Vec::new();
    }

    let scores = pagerank::rank(&graph, opts).scores;

    let mut by_score: Vec<usize> = (0..terms.len()).collect();
    by_score.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    let keep = ((terms.len() as f64 * opts.keyword_ratio).ceil() as usize).clamp(1, terms.len());
    let kept: HashSet<usize> = by_score.into_iter().take(keep).collect();

    let mut candidates = merge_phrases(&tokens, &ids, &kept, &scores);
    candidates.sort_by(|a, b| {
        b.0.score
            .total_cmp(&a.0.score)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    candidates.into_iter().map(|(ranked, _, _)| ranked).collect()
}

/// Collect runs of kept words that are adjacent in the source.
///
/// Returns `(candidate, word count, first position)` with duplicates removed.
fn merge_phrases(
    tokens: &[Token],
    ids: &HashMap<&str, usize>,
    kept: &HashSet<usize>,
    scores: &[f64],
) -> Vec<(RankedTerm, usize, usize)> {
    let mut candidates: Vec<(RankedTerm, usize, usize)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut run: Vec<usize> = Vec::new();
    let mut run_start = 0;

    let mut flush = |run: &mut Vec<usize>, start: usize| {
        if run.is_empty() {
            return;
        }
        let term = run
            .iter()
            .map(|&pos| tokens[pos].text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if seen.insert(term.clone()) {
            let total: f64 = run.iter().map(|&pos| scores[ids[tokens[pos].text.as_str()]]).sum();
            let score = total / run.len() as f64;
            candidates.push((RankedTerm { term, score }, run.len(), start));
        }
        run.clear();
    };

    for (pos, token) in tokens.iter().enumerate() {
        let is_kept = ids
            .get(token.text.as_str())
            .is_some_and(|id| kept.contains(id));

        let continues = is_kept
            && token.joined
            && run
                .last()
                .is_some_and(|&prev| tokens[prev].text != token.text);

        if !continues {
            flush(&mut run, run_start);
        }
        if is_kept {
            if run.is_empty() {
                run_start = pos;
            }
            run.push(pos);
        }
    }
    flush(&mut run, run_start);

    candidates
}
