//! Embedding provider trait for generating vector embeddings from text.

use crate::error::{RagError, Result};

/// A provider that generates fixed-dimension embeddings from text.
///
/// Providers start unloaded. [`load`](EmbeddingProvider::load) performs the
/// one-time, potentially slow initialisation (model weights, vocabularies, ...)
/// and must be idempotent; it belongs at startup rather than on the request
/// path. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// implementation calls [`embed`](EmbeddingProvider::embed) sequentially;
/// backends that support native batching should override it.
///
/// # Example
///
/// ```rust
/// use salient_rag::{EmbeddingProvider, HashingEmbedder};
///
/// let provider = HashingEmbedder::new(64);
/// provider.load()?;
/// let embedding = provider.embed("hello world")?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// # Ok::<(), salient_rag::RagError>(())
/// ```
pub trait EmbeddingProvider: Send + Sync {
    /// A short name identifying the provider in logs and errors.
    fn name(&self) -> &str;

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Initialise the provider. Calls after the first successful one are no-ops.
    fn load(&self) -> Result<()>;

    /// Whether [`load`](EmbeddingProvider::load) has completed.
    fn is_loaded(&self) -> bool;

    /// Generate an embedding vector for a single text input.
    ///
    /// # Errors
    ///
    /// [`RagError::NotReady`] before loading, [`RagError::InvalidInput`] for
    /// empty or whitespace-only text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, row-aligned
    /// with `texts`.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text)?);
        }
        Ok(results)
    }
}

/// Shared precondition checks for [`EmbeddingProvider::embed`] implementations.
pub(crate) fn check_embed_input(provider: &dyn EmbeddingProvider, text: &str) -> Result<()> {
    if !provider.is_loaded() {
        return Err(RagError::NotReady { provider: provider.name().to_string() });
    }
    if text.trim().is_empty() {
        return Err(RagError::InvalidInput("cannot embed empty text".to_string()));
    }
    Ok(())
}

/// Scale `vector` to unit length; the zero vector is left as is.
pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}
