//! Tuning parameters shared by the ranking algorithms.

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

/// Configuration parameters for sentence ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankConfig {
    /// PageRank damping factor used by the graph family.
    pub damping: f64,
    /// Power iteration stops once no score moves by more than this.
    pub tolerance: f64,
    /// Upper bound on power iterations.
    pub max_iterations: usize,
    /// Minimum cosine similarity for a LexRank edge.
    pub lexrank_threshold: f64,
    /// Maximum run of non-significant words inside a Luhn cluster.
    pub luhn_max_gap: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
            lexrank_threshold: 0.1,
            luhn_max_gap: 4,
        }
    }
}

impl RankConfig {
    /// Create a new builder for constructing a [`RankConfig`].
    pub fn builder() -> RankConfigBuilder {
        RankConfigBuilder::default()
    }

    /// Check that every parameter is inside its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::ConfigError`] if:
    /// - `damping` is not strictly between 0 and 1
    /// - `tolerance <= 0`
    /// - `max_iterations == 0`
    /// - `lexrank_threshold` is outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(RankError::ConfigError(format!(
                "damping ({}) must be strictly between 0 and 1",
                self.damping
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(RankError::ConfigError(format!(
                "tolerance ({}) must be greater than zero",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RankError::ConfigError(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.lexrank_threshold) {
            return Err(RankError::ConfigError(format!(
                "lexrank_threshold ({}) must be within [0, 1]",
                self.lexrank_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`RankConfig`].
#[derive(Debug, Clone, Default)]
pub struct RankConfigBuilder {
    config: RankConfig,
}

impl RankConfigBuilder {
    /// Set the PageRank damping factor.
    pub fn damping(mut self, damping: f64) -> Self {
        self.config.damping = damping;
        self
    }

    /// Set the convergence tolerance of the power iteration.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the maximum number of power iterations.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the LexRank edge threshold.
    pub fn lexrank_threshold(mut self, threshold: f64) -> Self {
        self.config.lexrank_threshold = threshold;
        self
    }

    /// Set the maximum gap inside a Luhn significance cluster.
    pub fn luhn_max_gap(mut self, gap: usize) -> Self {
        self.config.luhn_max_gap = gap;
        self
    }

    /// Build the [`RankConfig`], validating its parameters.
    ///
    /// # Errors
    ///
    /// See [`RankConfig::validate`].
    pub fn build(self) -> Result<RankConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
