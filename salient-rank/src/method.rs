//! The closed set of ranking methods and their dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RankConfig;
use crate::error::{RankError, Result};
use crate::sentence::Sentence;
use crate::{frequency, lexrank, luhn, textrank, tfidf};

/// The two ranking families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingFamily {
    /// Structural centrality over a sentence graph.
    Graph,
    /// Term-frequency based salience.
    Statistical,
}

impl fmt::Display for RankingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingFamily::Graph => f.write_str("graph"),
            RankingFamily::Statistical => f.write_str("statistical"),
        }
    }
}

/// A sentence ranking method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// PageRank over word-overlap similarity.
    TextRank,
    /// Centrality over thresholded TF-IDF cosine similarity.
    LexRank,
    /// Luhn's significant-word clusters.
    Luhn,
    /// Summed TF-IDF weights, sentences as documents.
    TfIdf,
    /// Summed normalized document-wide word frequency.
    Frequency,
}

impl Method {
    /// Every method, graph family first.
    pub fn all() -> [Method; 5] {
        [Method::TextRank, Method::LexRank, Method::Luhn, Method::TfIdf, Method::Frequency]
    }

    /// The family this method belongs to.
    pub fn family(self) -> RankingFamily {
        match self {
            Method::TextRank | Method::LexRank | Method::Luhn => RankingFamily::Graph,
            Method::TfIdf | Method::Frequency => RankingFamily::Statistical,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::TextRank => "textrank",
            Method::LexRank => "lexrank",
            Method::Luhn => "luhn",
            Method::TfIdf => "tfidf",
            Method::Frequency => "frequency",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RankError;

    /// Parse a method name, case-insensitively. Family names select the
    /// family's default method: `graph` and `extractive` give TextRank,
    /// `statistical` gives TF-IDF.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "textrank" | "graph" | "extractive" => Ok(Method::TextRank),
            "lexrank" => Ok(Method::LexRank),
            "luhn" => Ok(Method::Luhn),
            "tfidf" | "tf-idf" | "statistical" => Ok(Method::TfIdf),
            "frequency" => Ok(Method::Frequency),
            _ => Err(RankError::UnknownMethod(s.to_string())),
        }
    }
}

/// A [`Method`] bound to its tuning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranker {
    method: Method,
    config: RankConfig,
}

impl Ranker {
    /// Create a ranker with the default [`RankConfig`].
    pub fn new(method: Method) -> Self {
        Self { method, config: RankConfig::default() }
    }

    /// Create a ranker with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::ConfigError`] if `config` fails validation.
    pub fn with_config(method: Method, config: RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { method, config })
    }

    /// The method this ranker applies.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The ranking parameters.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Score every sentence; the result is aligned with `sentences` and every
    /// score is non-negative.
    pub fn score(&self, sentences: &[Sentence]) -> Vec<f64> {
        match self.method {
            Method::TextRank => textrank::score(sentences, &self.config),
            Method::LexRank => lexrank::score(sentences, &self.config),
            Method::Luhn => luhn::score(sentences, &self.config),
            Method::TfIdf => tfidf::score(sentences),
            Method::Frequency => frequency::score(sentences),
        }
    }
}
