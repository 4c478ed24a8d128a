//! TextRank: PageRank over a word-overlap sentence graph.

use std::collections::HashSet;

use crate::config::RankConfig;
use crate::graph::SentenceGraph;
use crate::sentence::Sentence;
use crate::tokenize::stemmed_content_words;

/// Score sentences with TextRank.
///
/// The edge between two sentences is the number of shared stemmed content
/// words divided by `ln|Si| + ln|Sj|`. When both sentences have a single
/// word the denominator is zero and the raw overlap is used.
pub fn score(sentences: &[Sentence], config: &RankConfig) -> Vec<f64> {
    let bags: Vec<Vec<String>> = sentences.iter().map(|s| stemmed_content_words(&s.text)).collect();
    let sets: Vec<HashSet<&str>> =
        bags.iter().map(|b| b.iter().map(String::as_str).collect()).collect();

    let graph = SentenceGraph::from_fn(sentences.len(), |i, j| {
        similarity(bags[i].len(), bags[j].len(), sets[i].intersection(&sets[j]).count())
    });
    graph.rank(config)
}

fn similarity(len_a: usize, len_b: usize, overlap: usize) -> f64 {
    if overlap == 0 || len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let norm = (len_a as f64).ln() + (len_b as f64).ln();
    if norm.abs() < 1e-9 { overlap as f64 } else { overlap as f64 / norm }
}
