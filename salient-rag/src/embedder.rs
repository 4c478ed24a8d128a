//! Selection of the bundled embedding providers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::hashing::HashingEmbedder;

/// A bundled [`EmbeddingProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    /// [`HashingEmbedder`]: offline and deterministic, lexical matches only.
    Hashing,
    /// `all-MiniLM-L6-v2` via fastembed; needs the `fastembed` feature.
    MiniLm,
}

impl EmbedderKind {
    /// [`MiniLm`](EmbedderKind::MiniLm) when built with the `fastembed`
    /// feature, [`Hashing`](EmbedderKind::Hashing) otherwise.
    pub const fn preferred() -> Self {
        if cfg!(feature = "fastembed") { EmbedderKind::MiniLm } else { EmbedderKind::Hashing }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedderKind::Hashing => "hashing",
            EmbedderKind::MiniLm => "minilm",
        }
    }

    /// Create an unloaded provider of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] for
    /// [`MiniLm`](EmbedderKind::MiniLm) in a build without the `fastembed`
    /// feature.
    pub fn provider(self) -> Result<Arc<dyn EmbeddingProvider>> {
        match self {
            EmbedderKind::Hashing => Ok(Arc::new(HashingEmbedder::default())),
            #[cfg(feature = "fastembed")]
            EmbedderKind::MiniLm => Ok(Arc::new(crate::minilm::MiniLmEmbedder::new())),
            #[cfg(not(feature = "fastembed"))]
            EmbedderKind::MiniLm => Err(RagError::ConfigError(
                "the minilm embedder requires the `fastembed` feature".to_string(),
            )),
        }
    }
}

impl Default for EmbedderKind {
    fn default() -> Self {
        Self::preferred()
    }
}

impl fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedderKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" => Ok(EmbedderKind::Hashing),
            "minilm" | "all-minilm-l6-v2" => Ok(EmbedderKind::MiniLm),
            _ => Err(RagError::ConfigError(format!(
                "unknown embedder '{s}' (expected hashing or minilm)"
            ))),
        }
    }
}
