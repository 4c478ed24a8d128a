//! Error types for the `salient-rag` crate.

use salient_rank::RankError;
use thiserror::Error;

/// Errors that can occur in retrieval and summarization operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RagError {
    /// Empty or too-short text or query, or an unusable parameter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The embedding provider was used before [`load`](crate::EmbeddingProvider::load).
    #[error("Embedding provider '{provider}' is not loaded")]
    NotReady {
        /// The provider that is not ready.
        provider: String,
    },

    /// The embedding backend failed to load or to embed.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The similarity index was queried before it was built.
    #[error("Similarity index has not been built")]
    NotBuilt,

    /// The pipeline was queried before any documents were indexed.
    #[error("No documents have been indexed")]
    NotIndexed,

    /// Indexing was requested with zero documents.
    #[error("Cannot build an index from an empty document set")]
    EmptyCorpus,

    /// The ranking family or sub-method is not registered.
    #[error("Unknown ranking method: '{0}'")]
    UnknownMethod(String),

    /// An embedding's dimension differs from the index's fixed dimension.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension fixed by the index.
        expected: usize,
        /// The dimension that was produced.
        actual: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<RankError> for RagError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::InvalidInput(message) => RagError::InvalidInput(message),
            RankError::UnknownMethod(method) => RagError::UnknownMethod(method),
            RankError::ConfigError(message) => RagError::ConfigError(message),
        }
    }
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
