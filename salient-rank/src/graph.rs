//! Weighted sentence graph and PageRank-style centrality.
//!
//! The graph is a dense `n x n` weight matrix stored row-major in one `Vec`;
//! node `i` is sentence `i`. It lives only for the duration of one ranking
//! call.

use tracing::debug;

use crate::config::RankConfig;

/// Dense undirected weighted graph over sentence indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceGraph {
    n: usize,
    weights: Vec<f64>,
}

impl SentenceGraph {
    /// Build a symmetric graph by evaluating `weight(i, j)` once for every
    /// pair `i < j`. The diagonal is zero; negative and non-finite weights
    /// are stored as zero.
    pub fn from_fn<F>(n: usize, mut weight: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut weights = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = sanitize(weight(i, j));
                weights[i * n + j] = w;
                weights[j * n + i] = w;
            }
        }
        Self { n, weights }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Weight of the edge between `i` and `j`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.n + j]
    }

    /// Number of non-zero undirected edges.
    pub fn edge_count(&self) -> usize {
        (0..self.n).map(|i| ((i + 1)..self.n).filter(|&j| self.weight(i, j) > 0.0).count()).sum()
    }

    /// Rank the nodes by weighted PageRank.
    ///
    /// `s_i = (1 - d) / n + d * (sum_j w_ji / W_j * s_j + dangling / n)`, where
    /// `W_j` is the total weight leaving `j` and `dangling` is the mass held
    /// by nodes without edges. Iterates until no score changes by more than
    /// `config.tolerance`, or `config.max_iterations` is reached. Scores sum
    /// to one.
    pub fn rank(&self, config: &RankConfig) -> Vec<f64> {
        let n = self.n;
        if n == 0 {
            return Vec::new();
        }
        let n_f = n as f64;
        let out_weight: Vec<f64> =
            (0..n).map(|j| self.weights[j * n..(j + 1) * n].iter().sum()).collect();

        let mut scores = vec![1.0 / n_f; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        while iterations < config.max_iterations {
            iterations += 1;
            let dangling: f64 =
                (0..n).filter(|&j| out_weight[j] <= f64::EPSILON).map(|j| scores[j]).sum();

            let mut max_delta = 0.0_f64;
            for i in 0..n {
                let mut incoming = 0.0;
                for j in 0..n {
                    let w = self.weights[j * n + i];
                    if w > 0.0 && out_weight[j] > f64::EPSILON {
                        incoming += w / out_weight[j] * scores[j];
                    }
                }
                next[i] =
                    (1.0 - config.damping) / n_f + config.damping * (incoming + dangling / n_f);
                max_delta = max_delta.max((next[i] - scores[i]).abs());
            }
            std::mem::swap(&mut scores, &mut next);
            if max_delta < config.tolerance {
                break;
            }
        }

        debug!(nodes = n, iterations, "sentence graph ranked");
        scores
    }
}

fn sanitize(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}
