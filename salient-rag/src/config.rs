//! Configuration for the summarization pipeline.

use salient_rank::{Method, RankConfig, RankingFamily};
use serde::{Deserialize, Serialize};

use crate::embedder::EmbedderKind;
use crate::error::{RagError, Result};

/// Configuration parameters for the summarization pipeline.
///
/// Missing fields take their defaults when deserialized, so a JSON file only
/// needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of documents retrieved per query.
    pub top_k: usize,
    /// Number of sentences kept in a summary.
    pub num_sentences: usize,
    /// Method used by [`query`](crate::SummarizationPipeline::query).
    pub default_method: Method,
    /// Graph-family method used when comparing families.
    pub graph_method: Method,
    /// Statistical-family method used when comparing families.
    pub statistical_method: Method,
    /// Queries with fewer non-whitespace characters are rejected.
    pub min_query_chars: usize,
    /// Inserted between retrieved documents before summarizing.
    pub document_separator: String,
    /// Ranking parameters.
    pub rank: RankConfig,
    /// Embedding provider used when the pipeline builder is given none.
    pub embedder: EmbedderKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            num_sentences: 3,
            default_method: Method::TextRank,
            graph_method: Method::TextRank,
            statistical_method: Method::TfIdf,
            min_query_chars: 3,
            document_separator: "\n\n".to_string(),
            rank: RankConfig::default(),
            embedder: EmbedderKind::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new builder for constructing a [`PipelineConfig`].
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Check that the parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0` or `num_sentences == 0`
    /// - `graph_method` or `statistical_method` belongs to the wrong family
    /// - `document_separator` contains no blank line
    /// - the ranking parameters are invalid
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.num_sentences == 0 {
            return Err(RagError::ConfigError(
                "num_sentences must be greater than zero".to_string(),
            ));
        }
        if self.graph_method.family() != RankingFamily::Graph {
            return Err(RagError::ConfigError(format!(
                "graph_method ({}) is not a graph method",
                self.graph_method
            )));
        }
        if self.statistical_method.family() != RankingFamily::Statistical {
            return Err(RagError::ConfigError(format!(
                "statistical_method ({}) is not a statistical method",
                self.statistical_method
            )));
        }
        // Sentences never span a blank line, so this keeps documents apart.
        if !self.document_separator.contains("\n\n") {
            return Err(RagError::ConfigError(
                "document_separator must contain a blank line".to_string(),
            ));
        }
        self.rank.validate()?;
        Ok(())
    }
}

/// Builder for constructing a validated [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the number of documents retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of sentences kept in a summary.
    pub fn num_sentences(mut self, n: usize) -> Self {
        self.config.num_sentences = n;
        self
    }

    /// Set the default summarization method.
    pub fn default_method(mut self, method: Method) -> Self {
        self.config.default_method = method;
        self
    }

    /// Set the graph-family method used for comparisons.
    pub fn graph_method(mut self, method: Method) -> Self {
        self.config.graph_method = method;
        self
    }

    /// Set the statistical-family method used for comparisons.
    pub fn statistical_method(mut self, method: Method) -> Self {
        self.config.statistical_method = method;
        self
    }

    /// Set the minimum query length in non-whitespace characters.
    pub fn min_query_chars(mut self, n: usize) -> Self {
        self.config.min_query_chars = n;
        self
    }

    /// Set the separator placed between retrieved documents.
    pub fn document_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.document_separator = separator.into();
        self
    }

    /// Set the ranking parameters.
    pub fn rank(mut self, rank: RankConfig) -> Self {
        self.config.rank = rank;
        self
    }

    /// Set the bundled embedding provider.
    pub fn embedder(mut self, embedder: EmbedderKind) -> Self {
        self.config.embedder = embedder;
        self
    }

    /// Build the [`PipelineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] as described on
    /// [`PipelineConfig::validate`].
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
