//! Extractive summarization on top of a [`Ranker`].
//!
//! # Example
//!
//! ```rust
//! use salient_rank::{Method, Summarizer};
//!
//! let summarizer = Summarizer::new(Method::TextRank);
//! let summary = summarizer
//!     .summarize("Rust is fast. Rust is safe. Cats purr. Rust is fun.", 2)
//!     .unwrap();
//! assert!(summary.starts_with("Rust"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RankConfig;
use crate::error::{RankError, Result};
use crate::method::{Method, Ranker};
use crate::sentence::{self, Sentence};

/// A sentence together with its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    /// The sentence, including its source position.
    pub sentence: Sentence,
    /// Salience score; higher is more salient.
    pub score: f64,
}

/// Selects the most salient sentences of a text, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Summarizer {
    ranker: Ranker,
}

impl Summarizer {
    /// Create a summarizer for `method` with default parameters.
    pub fn new(method: Method) -> Self {
        Self { ranker: Ranker::new(method) }
    }

    /// Create a summarizer for `method` with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::ConfigError`] if `config` fails validation.
    pub fn with_config(method: Method, config: RankConfig) -> Result<Self> {
        Ok(Self { ranker: Ranker::with_config(method, config)? })
    }

    /// The ranking method in use.
    pub fn method(&self) -> Method {
        self.ranker.method()
    }

    /// Summarize `text` down to at most `num_sentences` sentences.
    ///
    /// Texts with no more than `num_sentences` sentences are returned in
    /// their normalized form without ranking. Otherwise the highest-scoring
    /// sentences are chosen (equal scores favour the earlier sentence) and
    /// emitted in their original order. Splitting the summary again yields
    /// exactly the chosen sentences; see [`sentence::join`].
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidInput`] if `text` is empty or only
    /// whitespace, or if `num_sentences` is zero.
    pub fn summarize(&self, text: &str, num_sentences: usize) -> Result<String> {
        if num_sentences == 0 {
            return Err(RankError::InvalidInput("num_sentences must be greater than zero".into()));
        }
        let sentences = split_non_empty(text)?;
        if sentences.len() <= num_sentences {
            debug!(
                method = %self.method(),
                sentence_count = sentences.len(),
                "text within requested length, returned unranked"
            );
            return Ok(sentence::join(&sentences));
        }

        let scores = self.ranker.score(&sentences);
        let selected = select_top(&scores, num_sentences);
        debug!(
            method = %self.method(),
            sentence_count = sentences.len(),
            selected = selected.len(),
            "summarized text"
        );
        Ok(sentence::join(selected.iter().map(|&i| &sentences[i])))
    }

    /// Summarize each text independently.
    ///
    /// # Errors
    ///
    /// Fails with the first error any element produces.
    pub fn summarize_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        num_sentences: usize,
    ) -> Result<Vec<String>> {
        texts.iter().map(|t| self.summarize(t.as_ref(), num_sentences)).collect()
    }

    /// Every sentence of `text` with its score, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidInput`] if `text` is empty or only
    /// whitespace.
    pub fn rank(&self, text: &str) -> Result<Vec<ScoredSentence>> {
        let sentences = split_non_empty(text)?;
        let scores = self.ranker.score(&sentences);
        Ok(sentences
            .into_iter()
            .zip(scores)
            .map(|(sentence, score)| ScoredSentence { sentence, score })
            .collect())
    }
}

fn split_non_empty(text: &str) -> Result<Vec<Sentence>> {
    let sentences = sentence::split_sentences(text);
    if sentences.is_empty() {
        return Err(RankError::InvalidInput("text must not be empty".into()));
    }
    Ok(sentences)
}

/// Indices of the `k` highest scores, ties broken by lower index, returned in
/// ascending index order.
pub fn select_top(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(k);
    order.sort_unstable();
    order
}
