//! # salient-rank
//!
//! Extractive sentence ranking for Salient.
//!
//! ## Overview
//!
//! A text is split into [`Sentence`]s, every sentence is scored by a
//! [`Ranker`], and a [`Summarizer`] keeps the best ones in their original
//! order. Two families of [`Method`] are available:
//!
//! | Method | Family | Idea |
//! |--------|--------|------|
//! | `textrank` | graph | PageRank over word-overlap similarity |
//! | `lexrank` | graph | Centrality over thresholded TF-IDF cosine |
//! | `luhn` | graph | Clusters of significant words |
//! | `tfidf` | statistical | Summed TF-IDF weights per sentence |
//! | `frequency` | statistical | Summed normalized word frequency |
//!
//! ## Quick Start
//!
//! ```rust
//! use salient_rank::{Method, Summarizer};
//!
//! let text = "Rust is a systems language. It is fast. Cats purr loudly. \
//!             Rust guarantees memory safety. Memory safety makes Rust reliable.";
//! let summary = Summarizer::new(Method::LexRank).summarize(text, 2)?;
//! assert_eq!(summary.matches('.').count(), 2);
//! # Ok::<(), salient_rank::RankError>(())
//! ```

pub mod config;
pub mod error;
pub mod frequency;
pub mod graph;
pub mod lexrank;
pub mod luhn;
pub mod method;
pub mod sentence;
pub mod summarizer;
pub mod textrank;
pub mod tfidf;
pub mod tokenize;

pub use config::{RankConfig, RankConfigBuilder};
pub use error::{RankError, Result};
pub use graph::SentenceGraph;
pub use method::{Method, Ranker, RankingFamily};
pub use sentence::{Sentence, normalize, split_sentences};
pub use summarizer::{ScoredSentence, Summarizer, select_top};
