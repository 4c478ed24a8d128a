//! Retrieval-summarization orchestrator.
//!
//! The [`SummarizationPipeline`] composes an [`EmbeddingProvider`], a
//! [`SimilarityIndex`] and the extractive [`Summarizer`]s: documents are
//! indexed once, then each query retrieves the most relevant ones and condenses
//! them into a short summary.
//!
//! # Example
//!
//! ```rust
//! use salient_rag::{EmbedderKind, Method, PipelineConfig, SourceDocument, SummarizationPipeline};
//!
//! let pipeline = SummarizationPipeline::builder()
//!     .config(PipelineConfig::builder().embedder(EmbedderKind::Hashing).build()?)
//!     .build()?;
//!
//! pipeline.index_documents(vec![
//!     SourceDocument::new("Wind turbines convert wind into electricity. They are tall."),
//!     SourceDocument::new("Bread rises because yeast produces gas. Ovens bake it."),
//! ])?;
//! let report = pipeline.query_and_summarize("wind electricity", 1, 1, Method::TextRank)?;
//! assert_eq!(report.retrieved_documents.len(), 1);
//! # Ok::<(), salient_rag::RagError>(())
//! ```

use std::sync::Arc;

use salient_rank::{Method, Summarizer};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::PipelineConfig;
use crate::document::{RetrievedDocument, SourceDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::{IndexStats, SimilarityIndex};
use crate::report::{CompareInput, MethodComparison, MethodSummary, SummaryReport};

/// Lifecycle of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// No documents indexed yet; queries fail with [`RagError::NotIndexed`].
    Unindexed,
    /// An index is published; queries are served from it.
    Indexed,
}

/// The retrieval-summarization pipeline.
///
/// Construct one via [`SummarizationPipeline::builder()`]. All operations take
/// `&self`; indexing swaps in a complete new index, so the pipeline can be
/// shared across threads while documents are re-indexed.
pub struct SummarizationPipeline {
    config: PipelineConfig,
    index: SimilarityIndex,
}

impl SummarizationPipeline {
    /// Create a new [`SummarizationPipelineBuilder`].
    pub fn builder() -> SummarizationPipelineBuilder {
        SummarizationPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        self.index.provider()
    }

    /// Return a reference to the underlying index.
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Whether documents have been indexed.
    pub fn state(&self) -> PipelineState {
        match self.index.snapshot() {
            Some(_) => PipelineState::Indexed,
            None => PipelineState::Unindexed,
        }
    }

    /// Current index statistics.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Index `documents`, replacing anything indexed before.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] for an empty set, or any embedding
    /// error. On failure the previous index, if any, keeps serving queries.
    pub fn index_documents<I, D>(&self, documents: I) -> Result<IndexStats>
    where
        I: IntoIterator<Item = D>,
        D: Into<SourceDocument>,
    {
        let stats = self.index.build(documents).map_err(|e| {
            error!(error = %e, "indexing failed");
            e
        })?;
        info!(num_documents = stats.num_documents, "documents indexed");
        Ok(stats)
    }

    /// Retrieve the `top_k` documents for `query` and summarize them.
    ///
    /// Retrieved texts are joined in retrieval order with the configured
    /// separator, then `num_sentences` sentences are extracted with `method`.
    ///
    /// # Errors
    ///
    /// - [`RagError::NotIndexed`] before [`index_documents`](Self::index_documents)
    /// - [`RagError::InvalidInput`] for a query shorter than `min_query_chars`
    ///   non-whitespace characters, or a zero `top_k` or `num_sentences`
    pub fn query_and_summarize(
        &self,
        query: &str,
        top_k: usize,
        num_sentences: usize,
        method: Method,
    ) -> Result<SummaryReport> {
        let retrieved = self.retrieve(query, top_k, num_sentences)?;
        let combined = self.combine(&retrieved);
        let summary = self.summarize_text(&combined, num_sentences, method).map_err(|e| {
            error!(%method, error = %e, "summarization failed");
            e
        })?;

        info!(%method, retrieved = retrieved.len(), summary_len = summary.len(), "query completed");
        Ok(SummaryReport {
            query: query.to_string(),
            method,
            summary,
            num_retrieved: retrieved.len(),
            retrieved_documents: retrieved,
        })
    }

    /// [`query_and_summarize`](Self::query_and_summarize) with the method
    /// given by name (`textrank`, `lexrank`, `luhn`, `tfidf`, `frequency`, or
    /// a family name `graph` / `statistical`).
    ///
    /// # Errors
    ///
    /// As for `query_and_summarize`, then [`RagError::UnknownMethod`] for an
    /// unrecognised name: an unindexed pipeline or a short query is reported
    /// first.
    pub fn query_and_summarize_named(
        &self,
        query: &str,
        top_k: usize,
        num_sentences: usize,
        method: &str,
    ) -> Result<SummaryReport> {
        self.check_query(query, num_sentences)?;
        let method: Method = method.parse()?;
        self.query_and_summarize(query, top_k, num_sentences, method)
    }

    /// Query with the configured `top_k`, `num_sentences` and default method.
    ///
    /// # Errors
    ///
    /// As for [`query_and_summarize`](Self::query_and_summarize).
    pub fn query(&self, query: &str) -> Result<SummaryReport> {
        self.query_and_summarize(
            query,
            self.config.top_k,
            self.config.num_sentences,
            self.config.default_method,
        )
    }

    /// Summarize the same input with the configured graph and statistical
    /// methods.
    ///
    /// A [`CompareInput::Query`] retrieves once and feeds both methods the
    /// same documents.
    ///
    /// # Errors
    ///
    /// As for [`query_and_summarize`](Self::query_and_summarize) for query
    /// input, or [`RagError::InvalidInput`] for empty text.
    pub fn compare_methods(
        &self,
        input: CompareInput,
        num_sentences: usize,
    ) -> Result<MethodComparison> {
        let (query, text, retrieved) = match input {
            CompareInput::Text(text) => (None, text, Vec::new()),
            CompareInput::Query { query, top_k } => {
                let retrieved = self.retrieve(&query, top_k, num_sentences)?;
                let text = self.combine(&retrieved);
                (Some(query), text, retrieved)
            }
        };

        let graph_method = self.config.graph_method;
        let statistical_method = self.config.statistical_method;
        let graph = self.summarize_text(&text, num_sentences, graph_method)?;
        let statistical = self.summarize_text(&text, num_sentences, statistical_method)?;

        info!(%graph_method, %statistical_method, retrieved = retrieved.len(), "methods compared");
        Ok(MethodComparison {
            query,
            graph: MethodSummary::new(graph_method, graph),
            statistical: MethodSummary::new(statistical_method, statistical),
            num_retrieved: retrieved.len(),
            retrieval_scores: retrieved.iter().map(|r| r.similarity).collect(),
            retrieved_documents: retrieved,
        })
    }

    /// Summarize `text` directly, without retrieval.
    ///
    /// # Errors
    ///
    /// [`RagError::InvalidInput`] for empty text or a zero `num_sentences`.
    pub fn summarize_text(
        &self,
        text: &str,
        num_sentences: usize,
        method: Method,
    ) -> Result<String> {
        let summarizer = Summarizer::with_config(method, self.config.rank.clone())?;
        Ok(summarizer.summarize(text, num_sentences)?)
    }

    fn check_query(&self, query: &str, num_sentences: usize) -> Result<()> {
        if self.state() == PipelineState::Unindexed {
            error!("query received before any documents were indexed");
            return Err(RagError::NotIndexed);
        }
        let query_chars = query.chars().filter(|c| !c.is_whitespace()).count();
        if query_chars < self.config.min_query_chars {
            return Err(RagError::InvalidInput(format!(
                "query must contain at least {} non-whitespace characters",
                self.config.min_query_chars
            )));
        }
        if num_sentences == 0 {
            return Err(RagError::InvalidInput(
                "num_sentences must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        num_sentences: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        self.check_query(query, num_sentences)?;
        let retrieved = self.index.retrieve(query, top_k).map_err(|e| {
            error!(top_k, error = %e, "retrieval failed");
            match e {
                RagError::NotBuilt => RagError::NotIndexed,
                other => other,
            }
        })?;
        debug!(
            top_k,
            retrieved = retrieved.len(),
            best = retrieved.first().map(|r| r.similarity),
            "documents retrieved"
        );
        Ok(retrieved)
    }

    fn combine(&self, retrieved: &[RetrievedDocument]) -> String {
        retrieved
            .iter()
            .map(|r| r.document.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.config.document_separator)
    }
}

/// Builder for constructing a [`SummarizationPipeline`].
///
/// The configuration is required. Without an explicit embedding provider the
/// one named by [`PipelineConfig::embedder`] is used.
/// [`build()`](SummarizationPipelineBuilder::build) validates the
/// configuration and loads the embedding provider, so the one-time
/// initialisation happens before the first query.
#[derive(Default)]
pub struct SummarizationPipelineBuilder {
    config: Option<PipelineConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl SummarizationPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider, overriding [`PipelineConfig::embedder`].
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Build the [`SummarizationPipeline`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the configuration is missing or
    /// invalid, or the provider's load error.
    pub fn build(self) -> Result<SummarizationPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        config.validate()?;
        let embedding_provider = match self.embedding_provider {
            Some(provider) => provider,
            None => config.embedder.provider()?,
        };

        embedding_provider.load().map_err(|e| {
            error!(
                provider = embedding_provider.name(),
                error = %e,
                "failed to load embedding provider"
            );
            e
        })?;

        Ok(SummarizationPipeline { config, index: SimilarityIndex::new(embedding_provider) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::EmbedderKind;
    use crate::hashing::HashingEmbedder;

    fn pipeline() -> SummarizationPipeline {
        SummarizationPipeline::builder()
            .config(PipelineConfig::default())
            .embedding_provider(Arc::new(HashingEmbedder::new(128)))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_requires_config() {
        let missing_config = SummarizationPipeline::builder()
            .embedding_provider(Arc::new(HashingEmbedder::default()))
            .build();
        assert!(matches!(missing_config, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn builder_falls_back_to_configured_embedder() {
        let config = PipelineConfig::builder().embedder(EmbedderKind::Hashing).build().unwrap();
        let pipeline = SummarizationPipeline::builder().config(config).build().unwrap();
        assert!(pipeline.embedding_provider().is_loaded());
        assert_eq!(pipeline.embedding_provider().name(), "hashing-bow-384");
    }

    #[test]
    fn builder_loads_provider() {
        let pipeline = pipeline();
        assert!(pipeline.embedding_provider().is_loaded());
        assert_eq!(pipeline.state(), PipelineState::Unindexed);
    }

    #[test]
    fn builder_surfaces_load_failure() {
        let result = SummarizationPipeline::builder()
            .config(PipelineConfig::default())
            .embedding_provider(Arc::new(HashingEmbedder::new(0)))
            .build();
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn indexing_changes_state() {
        let pipeline = pipeline();
        pipeline.index_documents(["One document here."]).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Indexed);
        assert_eq!(pipeline.stats().num_documents, 1);
    }

    #[test]
    fn query_validation_order() {
        let pipeline = pipeline();
        assert_eq!(pipeline.query("ab").unwrap_err(), RagError::NotIndexed);
        pipeline.index_documents(["Some text about gardens."]).unwrap();
        assert!(matches!(pipeline.query(" a b "), Err(RagError::InvalidInput(_))));
        assert!(matches!(
            pipeline.query_and_summarize("gardens", 0, 1, Method::Luhn),
            Err(RagError::InvalidInput(_))
        ));
        assert!(matches!(
            pipeline.query_and_summarize("gardens", 1, 0, Method::Luhn),
            Err(RagError::InvalidInput(_))
        ));
    }

    #[test]
    fn named_queries_report_missing_index_before_unknown_method() {
        let pipeline = pipeline();
        assert_eq!(
            pipeline.query_and_summarize_named("gardens", 1, 1, "bogus").unwrap_err(),
            RagError::NotIndexed
        );
        pipeline.index_documents(["Some text about gardens."]).unwrap();
        assert!(matches!(
            pipeline.query_and_summarize_named("ab", 1, 1, "bogus"),
            Err(RagError::InvalidInput(_))
        ));
        assert_eq!(
            pipeline.query_and_summarize_named("gardens", 1, 1, "bogus").unwrap_err(),
            RagError::UnknownMethod("bogus".to_string())
        );
    }

    #[test]
    fn documents_do_not_merge_sentences() {
        let pipeline = pipeline();
        // Neither text ends with punctuation; the separator still splits them.
        pipeline.index_documents(["gardens need water", "gardens need light"]).unwrap();
        let report = pipeline.query_and_summarize("gardens", 2, 1, Method::TfIdf).unwrap();
        assert!(report.summary == "gardens need water" || report.summary == "gardens need light");
        assert_eq!(report.num_retrieved, 2);

        let report = pipeline.query_and_summarize("gardens", 2, 2, Method::TfIdf).unwrap();
        assert!(report.summary.contains("\n\n"), "{:?}", report.summary);
        assert_eq!(salient_rank::split_sentences(&report.summary).len(), 2);
    }

    #[test]
    fn text_comparison_skips_retrieval() {
        let comparison = pipeline()
            .compare_methods(CompareInput::text("Cats purr. Dogs bark. Cats and dogs play."), 1)
            .unwrap();
        assert!(comparison.query.is_none());
        assert!(comparison.retrieved_documents.is_empty());
        assert_eq!(comparison.graph.method, Method::TextRank);
        assert_eq!(comparison.statistical.method, Method::TfIdf);
    }
}
