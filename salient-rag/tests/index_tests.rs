//! Property tests for similarity index ordering and clamping.

use std::sync::Arc;

use proptest::prelude::*;
use salient_rag::{
    EmbeddingProvider, HashingEmbedder, IndexStatus, RagError, Result, SimilarityIndex,
};

/// Embeds texts of the form `"0.5,-1,2"` as the listed numbers.
struct CsvProvider;

impl EmbeddingProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn dimensions(&self) -> usize {
        0
    }

    fn load(&self) -> Result<()> {
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        text.split(',')
            .map(|v| v.trim().parse().map_err(|_| RagError::InvalidInput(text.to_string())))
            .collect()
    }
}

fn to_csv(vector: &[f32]) -> String {
    vector.iter().map(f32::to_string).collect::<Vec<_>>().join(",")
}

fn hashing_index() -> SimilarityIndex {
    let embedder = Arc::new(HashingEmbedder::new(64));
    embedder.load().unwrap();
    SimilarityIndex::new(embedder)
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-z]{3,8}( [a-z]{3,8}){0,5}"
}

#[test]
fn stats_count_matches_documents() {
    let index = hashing_index();
    let stats = index.build(["first doc", "second doc", "third doc"]).unwrap();
    assert_eq!(stats.status, IndexStatus::Ready);
    assert_eq!(stats.num_documents, 3);
    assert_eq!(stats.num_vectors, 3);
    assert_eq!(stats.dimension, Some(64));
    assert_eq!(index.stats(), stats);
}

#[test]
fn exact_match_has_similarity_one() {
    let index = SimilarityIndex::new(Arc::new(CsvProvider));
    index.build(["1,0", "0,1", "1,1"]).unwrap();
    let results = index.search_vector(&[0.0, 1.0], 3).unwrap();
    assert_eq!(results[0].document.id, 1);
    assert_eq!(results[0].similarity, 1.0);
    assert_eq!(results[0].distance, 0.0);
    // (1,1) is one unit away, (1,0) two squared units.
    assert_eq!(results[1].document.id, 2);
    assert_eq!(results[2].distance, 2.0);
}

#[test]
fn concurrent_readers_see_whole_snapshots() {
    let index = hashing_index();
    index.build(["alpha beta", "gamma delta"]).unwrap();
    let large: Vec<String> = (0..50).map(|i| format!("document number {i}")).collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let n = index.retrieve("alpha document", 100).unwrap().len();
                    assert!(n == 2 || n == 50, "partial snapshot with {n} documents");
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..10 {
                index.build(large.iter().map(String::as_str)).unwrap();
                index.build(["alpha beta", "gamma delta"]).unwrap();
            }
        });
    });
}

/// **Property: retrieval is ordered by similarity, then insertion order**
/// *For any* corpus and query, results SHALL have similarities in (0, 1],
/// sorted descending, with equal similarities in ascending id order.
mod prop_retrieval_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_sorted_and_bounded(
            texts in proptest::collection::vec(arb_text(), 1..20),
            query in arb_text(),
            top_k in 1usize..25,
        ) {
            let index = hashing_index();
            index.build(texts.clone()).unwrap();
            let results = index.retrieve(&query, top_k).unwrap();

            prop_assert_eq!(results.len(), top_k.min(texts.len()));
            for result in &results {
                prop_assert!(result.similarity > 0.0 && result.similarity <= 1.0);
                prop_assert_eq!(&result.document.text, &texts[result.document.id]);
            }
            for pair in results.windows(2) {
                prop_assert!(pair[0].similarity >= pair[1].similarity);
                if pair[0].similarity == pair[1].similarity {
                    prop_assert!(pair[0].document.id < pair[1].document.id);
                }
            }
        }

        #[test]
        fn top_k_is_a_prefix_of_the_full_ranking(
            vectors in proptest::collection::vec(proptest::collection::vec(-4i8..4, 3), 1..30),
            query in proptest::collection::vec(-4i8..4, 3),
            top_k in 1usize..30,
        ) {
            // Small integer grids produce many exact ties.
            let vectors: Vec<Vec<f32>> =
                vectors.iter().map(|v| v.iter().map(|&x| f32::from(x)).collect()).collect();
            let query: Vec<f32> = query.iter().map(|&x| f32::from(x)).collect();

            let index = SimilarityIndex::new(Arc::new(CsvProvider));
            index.build(vectors.iter().map(|v| to_csv(v))).unwrap();

            let full = index.search_vector(&query, vectors.len()).unwrap();
            let head = index.search_vector(&query, top_k).unwrap();
            let full_ids: Vec<usize> = full.iter().map(|r| r.document.id).collect();
            let head_ids: Vec<usize> = head.iter().map(|r| r.document.id).collect();
            prop_assert_eq!(&head_ids[..], &full_ids[..head_ids.len()]);
        }
    }
}

/// **Property: top_k is clamped to the corpus size**
/// *For any* `top_k` at or above the corpus size, retrieval SHALL return every
/// document exactly once.
mod prop_clamping {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn oversized_top_k_returns_every_document(
            texts in proptest::collection::vec(arb_text(), 1..10),
            query in arb_text(),
            extra in 0usize..20,
        ) {
            let index = hashing_index();
            index.build(texts.clone()).unwrap();
            let results = index.retrieve(&query, texts.len() + extra).unwrap();
            let mut ids: Vec<usize> = results.iter().map(|r| r.document.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..texts.len()).collect::<Vec<_>>());
        }
    }
}
