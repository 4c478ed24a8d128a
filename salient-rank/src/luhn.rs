//! Luhn's significant-word clustering.

use std::collections::{HashMap, HashSet};

use crate::config::RankConfig;
use crate::sentence::Sentence;
use crate::tokenize::{is_stop_word, stem, words};

/// Score sentences with Luhn's method.
///
/// Significant words are stemmed content words occurring at least twice in
/// the whole text (every content word when nothing repeats). Within a
/// sentence, significant words closer than `config.luhn_max_gap`
/// non-significant words form a cluster scored `count^2 / span`; the
/// sentence takes its best cluster score.
pub fn score(sentences: &[Sentence], config: &RankConfig) -> Vec<f64> {
    let tokenized: Vec<Vec<String>> =
        sentences.iter().map(|s| words(&s.text).iter().map(|w| stem(w)).collect()).collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for word in tokenized.iter().flatten() {
        if is_content(word) {
            *frequency.entry(word.as_str()).or_insert(0) += 1;
        }
    }
    let mut significant: HashSet<&str> =
        frequency.iter().filter(|&(_, &count)| count >= 2).map(|(&w, _)| w).collect();
    if significant.is_empty() {
        significant = frequency.keys().copied().collect();
    }

    tokenized
        .iter()
        .map(|tokens| {
            let positions: Vec<usize> = tokens
                .iter()
                .enumerate()
                .filter(|(_, w)| significant.contains(w.as_str()))
                .map(|(i, _)| i)
                .collect();
            best_cluster(&positions, config.luhn_max_gap)
        })
        .collect()
}

fn is_content(word: &str) -> bool {
    word.chars().count() > 1 && !is_stop_word(word)
}

/// Best `count^2 / span` over clusters of significant-word positions.
fn best_cluster(positions: &[usize], max_gap: usize) -> f64 {
    let Some(&first) = positions.first() else {
        return 0.0;
    };
    let mut best = 0.0_f64;
    let (mut start, mut last, mut count) = (first, first, 1usize);
    for &p in &positions[1..] {
        if p - last - 1 > max_gap {
            best = best.max(cluster_score(start, last, count));
            start = p;
            count = 0;
        }
        last = p;
        count += 1;
    }
    best.max(cluster_score(start, last, count))
}

fn cluster_score(start: usize, end: usize, count: usize) -> f64 {
    let span = (end - start + 1) as f64;
    (count * count) as f64 / span
}
