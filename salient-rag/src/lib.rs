//! # salient-rag
//!
//! Query-focused retrieval and summarization for Salient.
//!
//! ## Overview
//!
//! This crate narrows a document set to the documents most relevant to a
//! query and condenses them with the extractive rankers of
//! [`salient_rank`]:
//!
//! - [`EmbeddingProvider`] turns text into vectors. With the `fastembed`
//!   feature, `MiniLmEmbedder` runs the `all-MiniLM-L6-v2` sentence
//!   transformer; [`HashingEmbedder`] is a deterministic provider that needs
//!   no model files. [`EmbedderKind`] picks one from configuration
//! - [`SimilarityIndex`] answers exact top-k queries over those vectors and
//!   swaps in rebuilt contents atomically
//! - [`SummarizationPipeline`] ties both together: index once, then
//!   query-and-summarize or compare ranking families
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use salient_rag::{HashingEmbedder, PipelineConfig, SourceDocument, SummarizationPipeline};
//!
//! let pipeline = SummarizationPipeline::builder()
//!     .config(PipelineConfig::builder().top_k(1).num_sentences(1).build()?)
//!     .embedding_provider(Arc::new(HashingEmbedder::default()))
//!     .build()?;
//!
//! pipeline.index_documents(vec![
//!     SourceDocument::new("Coral reefs shelter fish. Reefs are bleaching.")
//!         .with_metadata("category", "Ocean"),
//!     SourceDocument::new("Compilers translate code. Optimizers speed it up."),
//! ])?;
//!
//! let report = pipeline.query("coral reefs")?;
//! assert_eq!(report.retrieved_documents[0].document.metadata["category"], "Ocean");
//! # Ok::<(), salient_rag::RagError>(())
//! ```

pub mod config;
pub mod document;
pub mod embedder;
pub mod embedding;
pub mod error;
pub mod hashing;
pub mod index;
#[cfg(feature = "fastembed")]
pub mod minilm;
pub mod pipeline;
pub mod report;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use document::{Document, Metadata, RetrievedDocument, SourceDocument};
pub use embedder::EmbedderKind;
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hashing::HashingEmbedder;
pub use index::{IndexSnapshot, IndexStats, IndexStatus, SimilarityIndex};
#[cfg(feature = "fastembed")]
pub use minilm::MiniLmEmbedder;
pub use pipeline::{PipelineState, SummarizationPipeline, SummarizationPipelineBuilder};
pub use report::{CompareInput, MethodComparison, MethodSummary, SummaryReport};
pub use salient_rank::{Method, RankConfig, RankingFamily};
