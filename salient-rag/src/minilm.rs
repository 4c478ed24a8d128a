//! Sentence-transformer embeddings with `all-MiniLM-L6-v2`.
//!
//! This module is only available when the `fastembed` feature is enabled.
//! The ONNX model is fetched from Hugging Face on the first
//! [`load`](EmbeddingProvider::load) and cached on disk afterwards.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, error, info};

use crate::embedding::{EmbeddingProvider, check_embed_input, l2_normalize};
use crate::error::{RagError, Result};

/// An [`EmbeddingProvider`] running `all-MiniLM-L6-v2` locally through
/// fastembed.
///
/// # Example
///
/// ```rust,ignore
/// use salient_rag::{EmbeddingProvider, MiniLmEmbedder};
///
/// let embedder = MiniLmEmbedder::new().with_cache_dir("/var/cache/salient");
/// embedder.load()?;
/// let embedding = embedder.embed("physicians treating patients")?;
/// assert_eq!(embedding.len(), 384);
/// ```
pub struct MiniLmEmbedder {
    cache_dir: Option<PathBuf>,
    show_download_progress: bool,
    batch_size: Option<usize>,
    model: OnceLock<Mutex<TextEmbedding>>,
}

impl MiniLmEmbedder {
    /// Output dimensions of `all-MiniLM-L6-v2`.
    pub const DIMENSIONS: usize = 384;

    const NAME: &'static str = "all-MiniLM-L6-v2";

    /// Create an unloaded provider using fastembed's default cache directory.
    pub fn new() -> Self {
        Self {
            cache_dir: None,
            show_download_progress: false,
            batch_size: None,
            model: OnceLock::new(),
        }
    }

    /// Cache the model files under `dir`.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Print a progress bar while the model downloads.
    pub fn with_show_download_progress(mut self, show: bool) -> Self {
        self.show_download_progress = show;
        self
    }

    /// Texts per inference batch; fastembed's default when unset.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    fn embedding_error(message: impl std::fmt::Display) -> RagError {
        RagError::EmbeddingError { provider: Self::NAME.to_string(), message: message.to_string() }
    }

    fn run(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let model = self
            .model
            .get()
            .ok_or_else(|| RagError::NotReady { provider: Self::NAME.to_string() })?;
        let model = model.lock().unwrap_or_else(PoisonError::into_inner);
        let count = texts.len();
        let mut embeddings = model.embed(texts, self.batch_size).map_err(|e| {
            error!(provider = Self::NAME, error = %e, "embedding failed");
            Self::embedding_error(e)
        })?;
        if embeddings.len() != count {
            return Err(Self::embedding_error(format!(
                "expected {count} embeddings, got {}",
                embeddings.len()
            )));
        }
        embeddings.iter_mut().for_each(|e| l2_normalize(e));
        debug!(provider = Self::NAME, count, "embedded texts");
        Ok(embeddings)
    }
}

impl Default for MiniLmEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field("cache_dir", &self.cache_dir)
            .field("batch_size", &self.batch_size)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl EmbeddingProvider for MiniLmEmbedder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dimensions(&self) -> usize {
        Self::DIMENSIONS
    }

    fn load(&self) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }
        let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(self.show_download_progress);
        if let Some(dir) = &self.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }
        let model = TextEmbedding::try_new(options).map_err(|e| {
            error!(provider = Self::NAME, error = %e, "failed to load embedding model");
            Self::embedding_error(format!("failed to load model: {e}"))
        })?;
        // A concurrent load may have won; either model is equivalent.
        if self.model.set(Mutex::new(model)).is_ok() {
            info!(
                provider = Self::NAME,
                dimensions = Self::DIMENSIONS,
                "embedding provider loaded"
            );
        }
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        check_embed_input(self, text)?;
        self.run(vec![text])?
            .pop()
            .ok_or_else(|| Self::embedding_error("model returned no embedding"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        for text in texts {
            check_embed_input(self, text)?;
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.run(texts.to_vec())
    }
}
