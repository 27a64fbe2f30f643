//! Tests for in-memory vector store search ordering and filtering.

use docchat_rag::document::DocumentChunk;
use docchat_rag::inmemory::InMemoryVectorStore;
use docchat_rag::vectorstore::VectorStore;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = DocumentChunk> {
    ("[a-z]{3,12}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(document_name, content, embedding)| DocumentChunk::new(document_name, content, embedding),
    )
}

/// **Property: search ordering and bounds.**
/// For any set of stored chunks, searching returns at most `top_k` results,
/// ordered by non-increasing cosine similarity, with every score above the
/// store's threshold.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_bounded_and_above_threshold(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, stored_count) = rt.block_on(async {
                // Disable the relevance cut so ordering is observable on
                // arbitrary vectors, then check the threshold separately.
                let store = InMemoryVectorStore::new().with_threshold(-1.0);
                for chunk in &chunks {
                    store.store(chunk).await.unwrap();
                }
                let results = store.search_similar(&query, top_k).await.unwrap();
                (results, chunks.len())
            });

            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= stored_count);

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }

            for result in &results {
                prop_assert!(result.score > -1.0);
            }
        }

        #[test]
        fn default_threshold_filters_weak_matches(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let results = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                for chunk in &chunks {
                    store.store(chunk).await.unwrap();
                }
                store.search_similar(&query, 5).await.unwrap()
            });

            for result in &results {
                prop_assert!(result.score > 0.7, "score {} not above threshold", result.score);
            }
        }
    }
}

mod unit {
    use super::*;

    #[tokio::test]
    async fn store_assigns_increasing_ids() {
        let store = InMemoryVectorStore::new();
        let chunk = DocumentChunk::new("doc", "content", vec![1.0, 0.0]);

        let first = store.store(&chunk).await.unwrap();
        let second = store.store(&chunk).await.unwrap();
        assert!(second > first);

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, Some(first));
        assert_eq!(all[1].id, Some(second));
    }

    #[tokio::test]
    async fn search_skips_mismatched_dimensions() {
        let store = InMemoryVectorStore::new();
        store
            .store(&DocumentChunk::new("doc", "three dims", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        store
            .store(&DocumentChunk::new("doc", "two dims", vec![1.0, 0.0]))
            .await
            .unwrap();

        let results = store.search_similar(&[1.0, 0.0, 0.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "three dims");
    }

    #[tokio::test]
    async fn search_skips_empty_embeddings_but_get_all_lists_them() {
        let store = InMemoryVectorStore::new();
        store
            .store(&DocumentChunk::new("doc", "no embedding", Vec::new()))
            .await
            .unwrap();
        store
            .store(&DocumentChunk::new("doc", "embedded", vec![0.0, 1.0]))
            .await
            .unwrap();

        let results = store.search_similar(&[0.0, 1.0], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "embedded");

        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_on_empty_store_returns_nothing() {
        let store = InMemoryVectorStore::new();
        assert!(store.search_similar(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_all_removes_everything() {
        let store = InMemoryVectorStore::new();
        store
            .store(&DocumentChunk::new("doc", "content", vec![1.0]))
            .await
            .unwrap();
        store.clear_all().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn identical_vector_ranks_first_with_unit_score() {
        let dim = 768;
        let store = InMemoryVectorStore::new();

        // Five one-hot embeddings: mutually orthogonal, so only the chunk
        // matching the query direction clears the relevance threshold.
        for i in 0..5 {
            let mut embedding = vec![0.0f32; dim];
            embedding[i * 7] = 1.0;
            store
                .store(&DocumentChunk::new("doc", format!("chunk {i}"), embedding))
                .await
                .unwrap();
        }

        let mut query = vec![0.0f32; dim];
        query[7] = 1.0; // identical to "chunk 1"

        let results = store.search_similar(&query, 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "chunk 1");
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn mismatched_query_dimensionality_yields_no_results() {
        let store = InMemoryVectorStore::new();
        for i in 0..3 {
            let mut embedding = vec![0.0f32; 768];
            embedding[i] = 1.0;
            store
                .store(&DocumentChunk::new("doc", format!("chunk {i}"), embedding))
                .await
                .unwrap();
        }

        let query = vec![1.0f32; 512];
        assert!(store.search_similar(&query, 5).await.unwrap().is_empty());
    }
}
