//! Graph-based ranking for regulatory text.
//!
//! This crate turns raw section text into an extractive summary and a
//! representative keyword:
//! - [`normalize`] strips index labels and citations and flattens whitespace
//! - [`summarize`] ranks sentences over a content-overlap similarity graph
//! - [`extract_keyword`] ranks words over a co-occurrence graph
//!
//! Both rankers share the weighted PageRank in [`pagerank`] and never fail:
//! degenerate input falls back to the normalized text (summary) or an empty
//! string (keyword).

mod keywords;
mod normalize;
pub mod pagerank;
mod sentences;
mod summarize;
mod tokens;

use std::time::Instant;

use regsum_shared::RankingConfig;

pub use keywords::{RankedTerm, extract_keyword, extract_keywords};
pub use normalize::{normalize, strip_citation_prefix};
pub use sentences::split_sentences;
pub use summarize::{sentence_count, summarize, target_count};

/// Runtime ranking parameters, derived from [`RankingConfig`].
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// PageRank damping factor.
    pub damping: f64,
    /// Largest per-node score change accepted as converged.
    pub tolerance: f64,
    /// Iteration cap for power iteration.
    pub max_iterations: usize,
    /// Stop iterating once this instant passes, keeping the scores so far.
    pub deadline: Option<Instant>,
    /// Co-occurrence window for the keyword graph, in tokens.
    pub keyword_window: usize,
    /// Share of ranked terms kept as keyword candidates.
    pub keyword_ratio: f64,
    /// Sentences a section summary aims for; the section builder derives
    /// its ratio as `summary_sentences / N`.
    pub summary_sentences: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self::from(&RankingConfig::default())
    }
}

impl From<&RankingConfig> for RankOptions {
    fn from(config: &RankingConfig) -> Self {
        Self {
            damping: config.damping,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            deadline: None,
            keyword_window: config.keyword_window,
            keyword_ratio: config.keyword_ratio,
            summary_sentences: config.summary_sentences,
        }
    }
}

impl RankOptions {
    /// Same options with a convergence deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}
