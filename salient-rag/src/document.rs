//! Data types for documents and retrieval results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Open key-value metadata attached to a document (e.g. `title`, `category`).
pub type Metadata = HashMap<String, String>;

/// A document as handed to the index: text plus metadata, no identity yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceDocument {
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: Metadata,
}

impl SourceDocument {
    /// Create a document with no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), metadata: Metadata::new() }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for SourceDocument {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceDocument {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<(String, Metadata)> for SourceDocument {
    fn from((text, metadata): (String, Metadata)) -> Self {
        Self { text, metadata }
    }
}

/// A document stored in a built index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Insertion position in the index build that created it.
    pub id: usize,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    pub metadata: Metadata,
}

/// A retrieved [`Document`] paired with its relevance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievedDocument {
    /// The retrieved document.
    #[serde(flatten)]
    pub document: Document,
    /// Similarity in `(0, 1]`, higher is more relevant.
    pub similarity: f32,
    /// Raw squared L2 distance between query and document embeddings.
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_metadata() {
        let doc = SourceDocument::new("Quantum computers use qubits.")
            .with_metadata("title", "Quantum Computing")
            .with_metadata("category", "Quantum");
        assert_eq!(doc.metadata.len(), 2);
        assert_eq!(doc.metadata["title"], "Quantum Computing");
    }

    #[test]
    fn source_document_accepts_bare_strings_from_json() {
        let doc: SourceDocument = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(doc, SourceDocument::from("hello"));
    }

    #[test]
    fn retrieved_document_serializes_flat() {
        let retrieved = RetrievedDocument {
            document: Document { id: 0, text: "t".into(), metadata: Metadata::new() },
            similarity: 0.5,
            distance: 1.0,
        };
        let value = serde_json::to_value(&retrieved).unwrap();
        assert_eq!(value["text"], "t");
        assert_eq!(value["similarity"], 0.5);
    }
}
