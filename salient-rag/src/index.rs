//! Exact nearest-neighbour index over document embeddings.
//!
//! [`SimilarityIndex`] embeds documents with an [`EmbeddingProvider`] and
//! answers top-k queries by brute-force squared L2 distance. Built state lives
//! in an immutable [`IndexSnapshot`]; a rebuild constructs a complete new
//! snapshot before swapping it in, so readers see either the old or the new
//! index and never a partial one.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use salient_rag::{EmbeddingProvider, HashingEmbedder, SimilarityIndex, SourceDocument};
//!
//! let embedder = Arc::new(HashingEmbedder::default());
//! embedder.load()?;
//! let index = SimilarityIndex::new(embedder);
//! index.build(vec![
//!     SourceDocument::new("Solar panels turn sunlight into power."),
//!     SourceDocument::new("Penguins live in Antarctica."),
//! ])?;
//! let results = index.retrieve("solar power", 1)?;
//! assert_eq!(results[0].document.id, 0);
//! # Ok::<(), salient_rag::RagError>(())
//! ```

use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::document::{Document, RetrievedDocument, SourceDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Whether an index has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    /// No successful build yet.
    NotBuilt,
    /// A snapshot is published and queryable.
    Ready,
}

/// Summary of an index's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Build status.
    pub status: IndexStatus,
    /// Number of stored documents.
    pub num_documents: usize,
    /// Number of stored vectors; always equal to `num_documents`.
    pub num_vectors: usize,
    /// Vector dimension, once fixed by a build.
    pub dimension: Option<usize>,
}

/// An immutable, fully built set of documents and their embeddings.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    documents: Vec<Document>,
    /// Row-major `documents.len() x dimension` matrix.
    vectors: Vec<f32>,
    dimension: usize,
}

impl IndexSnapshot {
    fn new(sources: Vec<SourceDocument>, embeddings: Vec<Vec<f32>>, dimension: usize) -> Self {
        let mut vectors = Vec::with_capacity(sources.len() * dimension);
        for embedding in embeddings {
            vectors.extend(embedding);
        }
        let documents = sources
            .into_iter()
            .enumerate()
            .map(|(id, source)| Document { id, text: source.text, metadata: source.metadata })
            .collect();
        Self { documents, vectors, dimension }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the snapshot holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The fixed vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Stored documents in insertion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The embedding of document `id`.
    pub fn vector(&self, id: usize) -> Option<&[f32]> {
        (id < self.len()).then(|| &self.vectors[id * self.dimension..(id + 1) * self.dimension])
    }

    /// The `top_k` documents nearest to `query`, most similar first.
    ///
    /// `top_k` is clamped to the snapshot size. Similarity is
    /// `1 / (1 + distance)` over squared L2 distance; equal similarities keep
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if `query` has the wrong length.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32, f32)> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(id, vector)| {
                let distance = squared_l2(query, vector);
                (id, distance, 1.0 / (1.0 + distance))
            })
            .collect();

        let rank = |a: &(usize, f32, f32), b: &(usize, f32, f32)| -> Ordering {
            b.2.total_cmp(&a.2).then(a.0.cmp(&b.0))
        };
        let k = top_k.min(scored.len());
        if k == 0 {
            return Ok(Vec::new());
        }
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_by(rank);

        Ok(scored
            .into_iter()
            .map(|(id, distance, similarity)| RetrievedDocument {
                document: self.documents[id].clone(),
                similarity,
                distance,
            })
            .collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// A rebuildable similarity index bound to one embedding provider.
pub struct SimilarityIndex {
    provider: Arc<dyn EmbeddingProvider>,
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl SimilarityIndex {
    /// Create an empty, unbuilt index.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider, current: RwLock::new(None) }
    }

    /// The embedding provider used for documents and queries.
    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// The currently published snapshot, if the index has been built.
    pub fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        // Snapshots are swapped whole, so a poisoned lock still guards a
        // consistent value.
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Embed `documents` and publish them as the new index contents.
    ///
    /// The first build fixes the vector dimension; later builds must produce
    /// vectors of the same dimension. On any error the previously published
    /// snapshot stays in place.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyCorpus`] if `documents` is empty
    /// - [`RagError::DimensionMismatch`] if embeddings disagree on dimension
    /// - any error from the embedding provider
    pub fn build<I, D>(&self, documents: I) -> Result<IndexStats>
    where
        I: IntoIterator<Item = D>,
        D: Into<SourceDocument>,
    {
        let sources: Vec<SourceDocument> = documents.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            error!("refusing to build index from an empty document set");
            return Err(RagError::EmptyCorpus);
        }

        let texts: Vec<&str> = sources.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.provider.embed_batch(&texts).map_err(|e| {
            error!(
                provider = self.provider.name(),
                error = %e,
                "embedding failed during index build"
            );
            e
        })?;
        if embeddings.len() != sources.len() {
            return Err(RagError::InvalidInput(format!(
                "provider '{}' returned {} embeddings for {} documents",
                self.provider.name(),
                embeddings.len(),
                sources.len()
            )));
        }

        let dimension = match self.snapshot() {
            Some(previous) => previous.dimension(),
            None => embeddings[0].len(),
        };
        if dimension == 0 {
            return Err(RagError::InvalidInput("embeddings must not be empty".to_string()));
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dimension) {
            error!(expected = dimension, actual = bad.len(), "embedding dimension mismatch");
            return Err(RagError::DimensionMismatch { expected: dimension, actual: bad.len() });
        }

        let snapshot = Arc::new(IndexSnapshot::new(sources, embeddings, dimension));
        let stats = stats_of(Some(&snapshot));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

        info!(num_documents = stats.num_documents, dimension, "index built");
        Ok(stats)
    }

    /// Retrieve the `top_k` documents most similar to `query`.
    ///
    /// # Errors
    ///
    /// - [`RagError::NotBuilt`] before the first successful build
    /// - [`RagError::InvalidInput`] if `top_k` is zero
    /// - any error from embedding the query
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let snapshot = self.snapshot().ok_or(RagError::NotBuilt)?;
        if top_k == 0 {
            return Err(RagError::InvalidInput("top_k must be greater than zero".to_string()));
        }
        let embedding = self.provider.embed(query)?;
        let results = snapshot.search(&embedding, top_k)?;
        debug!(top_k, result_count = results.len(), "retrieval completed");
        Ok(results)
    }

    /// Search with a pre-computed query embedding.
    ///
    /// # Errors
    ///
    /// [`RagError::NotBuilt`], [`RagError::InvalidInput`] for a zero `top_k`,
    /// or [`RagError::DimensionMismatch`].
    pub fn search_vector(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let snapshot = self.snapshot().ok_or(RagError::NotBuilt)?;
        if top_k == 0 {
            return Err(RagError::InvalidInput("top_k must be greater than zero".to_string()));
        }
        snapshot.search(embedding, top_k)
    }

    /// Current document count, dimension and build status.
    pub fn stats(&self) -> IndexStats {
        stats_of(self.snapshot().as_ref())
    }
}

fn stats_of(snapshot: Option<&Arc<IndexSnapshot>>) -> IndexStats {
    match snapshot {
        Some(s) => IndexStats {
            status: IndexStatus::Ready,
            num_documents: s.len(),
            num_vectors: s.vectors.len() / s.dimension,
            dimension: Some(s.dimension),
        },
        None => IndexStats {
            status: IndexStatus::NotBuilt,
            num_documents: 0,
            num_vectors: 0,
            dimension: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashingEmbedder;

    /// Provider returning caller-chosen vectors, keyed by text.
    struct FixedProvider {
        dimension: usize,
    }

    impl EmbeddingProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }
        fn dimensions(&self) -> usize {
            self.dimension
        }
        fn load(&self) -> Result<()> {
            Ok(())
        }
        fn is_loaded(&self) -> bool {
            true
        }
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let value: f32 = text.parse().map_err(|_| RagError::InvalidInput(text.to_string()))?;
            Ok(vec![value; self.dimension])
        }
    }

    fn fixed_index(dimension: usize) -> SimilarityIndex {
        SimilarityIndex::new(Arc::new(FixedProvider { dimension }))
    }

    #[test]
    fn stats_before_build() {
        let stats = fixed_index(2).stats();
        assert_eq!(stats.status, IndexStatus::NotBuilt);
        assert_eq!(stats.num_documents, 0);
        assert_eq!(stats.dimension, None);
    }

    #[test]
    fn retrieve_before_build_fails() {
        assert_eq!(fixed_index(2).retrieve("1", 1).unwrap_err(), RagError::NotBuilt);
    }

    #[test]
    fn empty_build_fails() {
        let index = fixed_index(2);
        assert_eq!(index.build(Vec::<SourceDocument>::new()).unwrap_err(), RagError::EmptyCorpus);
        assert_eq!(index.stats().status, IndexStatus::NotBuilt);
    }

    #[test]
    fn similarity_is_inverse_of_one_plus_distance() {
        let index = fixed_index(1);
        index.build(["0", "2"]).unwrap();
        let results = index.retrieve("0", 2).unwrap();
        assert_eq!(results[0].document.id, 0);
        assert_eq!(results[0].similarity, 1.0);
        assert_eq!(results[1].distance, 4.0);
        assert!((results[1].similarity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = fixed_index(1);
        index.build(["1", "3", "1", "3", "1"]).unwrap();
        // Distances from 2 are all equal.
        let ids: Vec<usize> =
            index.retrieve("2", 5).unwrap().iter().map(|r| r.document.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        let ids: Vec<usize> =
            index.retrieve("2", 2).unwrap().iter().map(|r| r.document.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn top_k_is_clamped_and_zero_rejected() {
        let index = fixed_index(1);
        index.build(["1", "2", "3"]).unwrap();
        assert_eq!(index.retrieve("1", 10).unwrap().len(), 3);
        assert!(matches!(index.retrieve("1", 0), Err(RagError::InvalidInput(_))));
    }

    #[test]
    fn rebuild_replaces_contents() {
        let index = fixed_index(1);
        index.build(["1", "2", "3"]).unwrap();
        let stats = index.build(["5"]).unwrap();
        assert_eq!(stats.num_documents, 1);
        assert_eq!(index.retrieve("5", 3).unwrap()[0].document.text, "5");
    }

    #[test]
    fn failed_rebuild_keeps_previous_snapshot() {
        let index = fixed_index(1);
        index.build(["1", "2"]).unwrap();
        assert!(index.build(["not a number"]).is_err());
        assert!(index.build(Vec::<&str>::new()).is_err());
        assert_eq!(index.stats().num_documents, 2);
    }

    /// Provider whose output dimension is the text's word count.
    struct WordCountProvider;

    impl EmbeddingProvider for WordCountProvider {
        fn name(&self) -> &str {
            "word-count"
        }
        fn dimensions(&self) -> usize {
            0
        }
        fn load(&self) -> Result<()> {
            Ok(())
        }
        fn is_loaded(&self) -> bool {
            true
        }
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0; text.split_whitespace().count()])
        }
    }

    #[test]
    fn dimension_is_fixed_by_first_build() {
        let index = SimilarityIndex::new(Arc::new(WordCountProvider));
        index.build(["one two three", "four five six"]).unwrap();
        assert_eq!(index.stats().dimension, Some(3));

        assert_eq!(
            index.build(["one two"]).unwrap_err(),
            RagError::DimensionMismatch { expected: 3, actual: 2 }
        );
        assert_eq!(index.stats().num_documents, 2);
        assert_eq!(
            index.retrieve("one", 1).unwrap_err(),
            RagError::DimensionMismatch { expected: 3, actual: 1 }
        );
        assert_eq!(
            index.search_vector(&[0.0; 4], 1).unwrap_err(),
            RagError::DimensionMismatch { expected: 3, actual: 4 }
        );
        index.build(["seven eight nine"]).unwrap();
        assert_eq!(index.stats().num_documents, 1);
    }

    #[test]
    fn mixed_dimensions_within_a_build_fail() {
        let index = SimilarityIndex::new(Arc::new(WordCountProvider));
        assert_eq!(
            index.build(["one two", "three"]).unwrap_err(),
            RagError::DimensionMismatch { expected: 2, actual: 1 }
        );
        assert_eq!(index.stats().status, IndexStatus::NotBuilt);
    }

    #[test]
    fn metadata_travels_with_results() {
        let embedder = Arc::new(HashingEmbedder::new(64));
        embedder.load().unwrap();
        let index = SimilarityIndex::new(embedder);
        index
            .build(vec![
                SourceDocument::new("Cybersecurity threats evolve.")
                    .with_metadata("category", "Security"),
            ])
            .unwrap();
        let results = index.retrieve("security threats", 1).unwrap();
        assert_eq!(results[0].document.metadata["category"], "Security");
    }

    #[test]
    fn unloaded_provider_is_not_ready() {
        let index = SimilarityIndex::new(Arc::new(HashingEmbedder::new(16)));
        assert!(matches!(index.build(["text"]), Err(RagError::NotReady { .. })));
    }
}
