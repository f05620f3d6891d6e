//! Embedding vector index: cosine-similarity top-k search over node-id
//! keyed vectors, kept as a companion to the knowledge graph and populated
//! independently of it. The teacher has no vector store of its own; the
//! shared-read/exclusive-write `RwLock` split is enriched from the wider
//! pack's in-process indexes (loctree's `SnapshotIndex`, rivets-mcp's
//! `ToolContext`).

mod index;
mod snapshot;

pub use index::{ScoredMatch, VectorEntry, VectorIndex};
pub use snapshot::{load, save};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_has_count_remove_roundtrip() {
        let index = VectorIndex::new();
        index.add("n1".to_string(), vec![1.0, 0.0, 0.0], "fn foo".to_string()).unwrap();
        assert!(index.has("n1"));
        assert_eq!(index.count(), 1);

        index.remove("n1");
        assert!(!index.has("n1"));
        assert_eq!(index.count(), 0);
    }

    #[test]
    fn search_ranks_by_cosine_similarity_descending() {
        let index = VectorIndex::new();
        index.add("same".to_string(), vec![1.0, 0.0], "a".to_string()).unwrap();
        index.add("orthogonal".to_string(), vec![0.0, 1.0], "b".to_string()).unwrap();
        index.add("opposite".to_string(), vec![-1.0, 0.0], "c".to_string()).unwrap();

        let results = index.search(&[1.0, 0.0], 5);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "same");
        assert_eq!(results[2].id, "opposite");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn search_clamps_k_to_available_count() {
        let index = VectorIndex::new();
        index.add("only".to_string(), vec![1.0], "x".to_string()).unwrap();
        assert_eq!(index.search(&[1.0], 10).len(), 1);
    }

    #[test]
    fn search_on_empty_index_returns_empty() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 2.0], 5).is_empty());
    }

    #[test]
    fn zero_norm_vector_scores_zero_not_nan() {
        let index = VectorIndex::new();
        index.add("zero".to_string(), vec![0.0, 0.0], "z".to_string()).unwrap();
        let results = index.search(&[1.0, 0.0], 1);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn dimension_is_fixed_on_first_insert() {
        let index = VectorIndex::new();
        index.add("a".to_string(), vec![1.0, 0.0], "x".to_string()).unwrap();
        assert_eq!(index.dimension(), Some(2));
        let err = index.add("b".to_string(), vec![1.0, 0.0, 0.0], "y".to_string());
        assert!(err.is_err());
    }

    #[test]
    fn clear_resets_count_and_dimension() {
        let index = VectorIndex::new();
        index.add("a".to_string(), vec![1.0], "x".to_string()).unwrap();
        index.clear();
        assert_eq!(index.count(), 0);
        assert_eq!(index.dimension(), None);
    }

    #[test]
    fn save_and_load_round_trips() {
        let index = VectorIndex::new();
        index.add("a".to_string(), vec![1.0, 2.0, 3.0], "hello".to_string()).unwrap();
        index.add("b".to_string(), vec![4.0, 5.0, 6.0], "world".to_string()).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vectors.bin");
        save(&index, &path).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.count(), 2);
        assert!(restored.has("a"));
        assert_eq!(restored.dimension(), Some(3));
    }
}
