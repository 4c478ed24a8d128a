//! LexRank: centrality over a thresholded TF-IDF cosine graph.

use crate::config::RankConfig;
use crate::graph::SentenceGraph;
use crate::sentence::Sentence;
use crate::tfidf::{dot, tfidf_rows};
use crate::tokenize::stemmed_content_words;

/// Score sentences with LexRank.
///
/// Sentences are TF-IDF vectors over stemmed content words. Two distinct
/// sentences are linked with weight 1 when their cosine similarity reaches
/// `config.lexrank_threshold`. There are no self-loops, so a sentence that
/// resembles nothing else keeps only the teleport share of the score.
pub fn score(sentences: &[Sentence], config: &RankConfig) -> Vec<f64> {
    let docs: Vec<Vec<String>> = sentences.iter().map(|s| stemmed_content_words(&s.text)).collect();
    let rows = tfidf_rows(&docs);

    let graph = SentenceGraph::from_fn(sentences.len(), |i, j| {
        if rows[i].is_empty() || rows[j].is_empty() {
            return 0.0;
        }
        // Rows are unit length, so the dot product is the cosine.
        if dot(&rows[i], &rows[j]) >= config.lexrank_threshold { 1.0 } else { 0.0 }
    });
    graph.rank(config)
}
