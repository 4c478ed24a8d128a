//! TF-IDF sentence salience, with each sentence treated as a document.

use std::collections::BTreeMap;

use crate::sentence::Sentence;
use crate::tokenize::content_words;

/// A sparse row: `(term id, weight)` pairs sorted by term id.
pub(crate) type SparseRow = Vec<(usize, f64)>;

/// Build L2-normalized TF-IDF rows for `docs`.
///
/// Term frequency is the raw count; idf is smoothed,
/// `ln((1 + n) / (1 + df)) + 1`, so terms present in every document keep a
/// positive weight. Documents without terms yield empty rows.
pub(crate) fn tfidf_rows(docs: &[Vec<String>]) -> Vec<SparseRow> {
    let mut vocabulary: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in docs {
        for term in doc {
            let next_id = vocabulary.len();
            vocabulary.entry(term.as_str()).or_insert(next_id);
        }
    }

    let counts: Vec<BTreeMap<usize, f64>> = docs
        .iter()
        .map(|doc| {
            let mut row = BTreeMap::new();
            for term in doc {
                *row.entry(vocabulary[term.as_str()]).or_insert(0.0) += 1.0;
            }
            row
        })
        .collect();

    let mut df = vec![0usize; vocabulary.len()];
    for row in &counts {
        for &term in row.keys() {
            df[term] += 1;
        }
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0).collect();

    counts
        .into_iter()
        .map(|row| {
            let mut weighted: SparseRow = row.into_iter().map(|(t, tf)| (t, tf * idf[t])).collect();
            let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                weighted.iter_mut().for_each(|(_, w)| *w /= norm);
            }
            weighted
        })
        .collect()
}

/// Dot product of two sparse rows sorted by term id.
pub(crate) fn dot(a: &SparseRow, b: &SparseRow) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Score each sentence by the sum of its normalized TF-IDF weights.
///
/// Sentences made only of stop words score zero.
pub fn score(sentences: &[Sentence]) -> Vec<f64> {
    let docs: Vec<Vec<String>> = sentences.iter().map(|s| content_words(&s.text)).collect();
    tfidf_rows(&docs).iter().map(|row| row.iter().map(|(_, w)| w).sum()).collect()
}
