//! Weighted PageRank over an undirected graph.
//!
//! ```text
//! PR(i) = (1-d)/N + d * ( Σ_j  w(j,i) / W(j) * PR(j)  +  D/N )
//!
//! where:
//!   d    = damping factor
//!   W(j) = total edge weight at node j
//!   D    = score mass held by nodes with no edges, spread uniformly
//! ```
//!
//! Iteration stops when the largest per-node change drops below the
//! tolerance, when the iteration cap is hit, or when the deadline passes.
//! The last computed scores are returned in every case.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::RankOptions;

/// Undirected weighted graph with nodes `0..n`.
///
/// Parallel edges accumulate weight; self-loops and non-positive weights are ignored.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl WeightedGraph {
    /// Create a graph with `n` isolated nodes.
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); n],
        }
    }

    /// Add `weight` to the edge between `a` and `b`.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) {
        if a == b || !(weight > 0.0) {
            return;
        }
        *self.adjacency[a].entry(b).or_insert(0.0) += weight;
        *self.adjacency[b].entry(a).or_insert(0.0) += weight;
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Weight of the edge between `a` and `b`, or 0.0 when absent.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.adjacency
            .get(a)
            .and_then(|edges| edges.get(&b))
            .copied()
            .unwrap_or(0.0)
    }

    fn strength(&self, node: usize) -> f64 {
        self.adjacency[node].values().sum()
    }
}

/// Scores plus convergence diagnostics.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// One score per node, summing to 1.
    pub scores: Vec<f64>,
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the tolerance was reached.
    pub converged: bool,
}

/// Run power iteration until convergence, the iteration cap, or the deadline.
pub fn rank(graph: &WeightedGraph, opts: &RankOptions) -> RankOutcome {
    let n = graph.node_count();
    if n == 0 {
        return RankOutcome {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let damping = opts.damping;
    let uniform = 1.0 / n as f64;
    let base = (1.0 - damping) * uniform;
    let strengths: Vec<f64> = (0..n).map(|i| graph.strength(i)).collect();

    let mut scores = vec![uniform; n];
    let mut iterations = 0;
    let mut converged = false;
    let mut max_delta = f64::INFINITY;

    while iterations < opts.max_iterations {
        if opts.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            debug!(iterations, "rank deadline reached, keeping current scores");
            break;
        }

        let dangling: f64 = (0..n)
            .filter(|&j| strengths[j] == 0.0)
            .map(|j| scores[j])
            .sum();

        let mut next = vec![base + damping * dangling * uniform; n];
        for (i, slot) in next.iter_mut().enumerate() {
            let incoming: f64 = graph.adjacency[i]
                .iter()
                .map(|(&j, &w)| w / strengths[j] * scores[j])
                .sum();
            *slot += damping * incoming;
        }

        max_delta = next
            .iter()
            .zip(&scores)
            .map(|(new, old)| (new - old).abs())
            .fold(0.0, f64::max);

        scores = next;
        iterations += 1;

        if max_delta < opts.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        trace!(iterations, nodes = n, "rank converged");
    } else {
        debug!(iterations, max_delta, nodes = n, "rank stopped before converging");
    }

    RankOutcome {
        scores,
        iterations,
        converged,
    }
}
