//! Feature-hashing bag-of-words embedder.
//!
//! [`HashingEmbedder`] needs no model weights: every token is hashed into one
//! of `dimensions` buckets with a pseudo-random sign, weighted by sublinear
//! term frequency, and the vector is L2-normalized. Only texts that share
//! words land close together; it has no notion of synonyms. Use it for
//! offline runs and tests, and the MiniLM provider for real retrieval.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use salient_rank::tokenize::{content_words, stem, words};
use tracing::{debug, info};

use crate::embedding::{EmbeddingProvider, check_embed_input, l2_normalize};
use crate::error::{RagError, Result};

/// A deterministic, offline [`EmbeddingProvider`].
///
/// # Example
///
/// ```rust
/// use salient_rag::{EmbeddingProvider, HashingEmbedder};
///
/// let embedder = HashingEmbedder::default();
/// embedder.load()?;
/// let a = embedder.embed("solar energy")?;
/// let b = embedder.embed("solar energy")?;
/// assert_eq!(a, b);
/// # Ok::<(), salient_rag::RagError>(())
/// ```
#[derive(Debug)]
pub struct HashingEmbedder {
    name: String,
    dimensions: usize,
    loaded: OnceLock<()>,
}

impl HashingEmbedder {
    /// Default embedding dimensions.
    pub const DEFAULT_DIMENSIONS: usize = 384;

    /// Create an unloaded embedder producing `dimensions`-sized vectors.
    ///
    /// A dimension of zero is rejected by [`load`](EmbeddingProvider::load).
    pub fn new(dimensions: usize) -> Self {
        Self { name: format!("hashing-bow-{dimensions}"), dimensions, loaded: OnceLock::new() }
    }

    /// Token features of `text`: stemmed content words, falling back to all
    /// words, then to character trigrams.
    fn features(text: &str) -> Vec<String> {
        let content = content_words(text);
        if !content.is_empty() {
            return content.iter().map(|w| stem(w)).collect();
        }
        let all = words(text);
        if !all.is_empty() {
            return all;
        }
        let chars: Vec<char> = text.trim().chars().collect();
        if chars.len() < 3 {
            return vec![chars.into_iter().collect()];
        }
        chars.windows(3).map(|w| w.iter().collect()).collect()
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSIONS)
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn load(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(RagError::ConfigError(
                "embedding dimensions must be greater than zero".into(),
            ));
        }
        self.loaded.get_or_init(|| {
            info!(provider = %self.name, dimensions = self.dimensions, "embedding provider loaded");
        });
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        check_embed_input(self, text)?;

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for feature in Self::features(text) {
            *counts.entry(feature).or_insert(0) += 1;
        }

        let mut embedding = vec![0.0f32; self.dimensions];
        for (feature, tf) in &counts {
            let hash = fnv1a(feature.as_bytes());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign * (1.0 + (*tf as f32).ln());
        }

        l2_normalize(&mut embedding);
        debug!(
            provider = %self.name,
            features = counts.len(),
            text_len = text.len(),
            "embedded text"
        );
        Ok(embedding)
    }
}

/// 64-bit FNV-1a; stable across platforms and releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
