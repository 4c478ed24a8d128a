//! Normalized term-frequency salience.

use std::collections::HashMap;

use crate::sentence::Sentence;
use crate::tokenize::content_words;

/// Score each sentence by the summed document-wide frequency of its content
/// words, normalized so the most frequent word weighs 1.
pub fn score(sentences: &[Sentence]) -> Vec<f64> {
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| content_words(&s.text)).collect();

    let mut frequency: HashMap<&str, f64> = HashMap::new();
    for word in tokenized.iter().flatten() {
        *frequency.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    let max = frequency.values().copied().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return vec![0.0; sentences.len()];
    }

    tokenized
        .iter()
        .map(|tokens| tokens.iter().map(|w| frequency[w.as_str()] / max).sum())
        .collect()
}
