//! Serializable results returned by the pipeline.

use salient_rank::{Method, RankingFamily};
use serde::{Deserialize, Serialize};

use crate::document::RetrievedDocument;

/// The outcome of one query-and-summarize call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryReport {
    /// The query as given.
    pub query: String,
    /// The method that produced the summary.
    pub method: Method,
    /// The extractive summary.
    pub summary: String,
    /// Number of documents retrieved; at most the requested `top_k`.
    pub num_retrieved: usize,
    /// Documents the summary was drawn from, most similar first.
    pub retrieved_documents: Vec<RetrievedDocument>,
}

/// A summary produced by one method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodSummary {
    /// The method used.
    pub method: Method,
    /// Family of `method`.
    pub family: RankingFamily,
    /// The extractive summary.
    pub summary: String,
}

impl MethodSummary {
    pub(crate) fn new(method: Method, summary: String) -> Self {
        Self { method, family: method.family(), summary }
    }
}

/// Graph and statistical summaries of the same input side by side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodComparison {
    /// The query, when the input came from retrieval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Summary from the configured graph-family method.
    pub graph: MethodSummary,
    /// Summary from the configured statistical-family method.
    pub statistical: MethodSummary,
    /// Number of documents retrieved; zero for direct text input.
    pub num_retrieved: usize,
    /// Similarity of each retrieved document, in retrieval order.
    pub retrieval_scores: Vec<f32>,
    /// Retrieved documents; empty for direct text input.
    pub retrieved_documents: Vec<RetrievedDocument>,
}

/// What [`compare_methods`](crate::SummarizationPipeline::compare_methods)
/// summarizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareInput {
    /// Summarize this text directly.
    Text(String),
    /// Retrieve documents for a query, then summarize them.
    Query {
        /// Natural-language query.
        query: String,
        /// Number of documents to retrieve.
        top_k: usize,
    },
}

impl CompareInput {
    /// Direct text input.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Query input.
    pub fn query(query: impl Into<String>, top_k: usize) -> Self {
        Self::Query { query: query.into(), top_k }
    }
}
