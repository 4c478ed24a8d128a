//! Error types for the `salient-rank` crate.

use thiserror::Error;

/// Errors that can occur while ranking or summarizing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The input text or a parameter is unusable (empty text, zero sentences, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested ranking method is not one of the registered families.
    #[error("Unknown ranking method: '{0}'")]
    UnknownMethod(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for ranking operations.
pub type Result<T> = std::result::Result<T, RankError>;
