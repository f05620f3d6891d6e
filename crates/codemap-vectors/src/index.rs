use codemap_common::error::CodemapError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// A single stored embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorEntry {
    pub id: String,
    pub vector: Vec<f32>,
    pub source_text: String,
}

/// One search result: the matched entry's id and its cosine similarity
/// against the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub id: String,
    pub score: f32,
    pub source_text: String,
}

#[derive(Default)]
struct State {
    entries: HashMap<String, VectorEntry>,
    dimension: Option<usize>,
}

/// `node_id -> embedding` map with cosine top-k search. Dimension is fixed
/// by the first insert and enforced on every subsequent one; `Clear`
/// resets it. Reads take a shared lock, mutation an exclusive one, so
/// concurrent queries never block each other.
#[derive(Default)]
pub struct VectorIndex {
    state: RwLock<State>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the vector for `id`. Rejects a vector whose
    /// length disagrees with the index's already-fixed dimension.
    pub fn add(&self, id: String, vector: Vec<f32>, source_text: String) -> Result<(), CodemapError> {
        let mut state = self.state.write().expect("vector index lock poisoned");
        match state.dimension {
            Some(dim) if dim != vector.len() => {
                return Err(CodemapError::DimensionMismatch {
                    expected: dim,
                    got: vector.len(),
                })
            }
            None => state.dimension = Some(vector.len()),
            _ => {}
        }
        state.entries.insert(id.clone(), VectorEntry { id, vector, source_text });
        Ok(())
    }

    pub fn remove(&self, id: &str) {
        self.state.write().expect("vector index lock poisoned").entries.remove(id);
    }

    pub fn has(&self, id: &str) -> bool {
        self.state.read().expect("vector index lock poisoned").entries.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.state.read().expect("vector index lock poisoned").entries.len()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.state.read().expect("vector index lock poisoned").dimension
    }

    pub fn clear(&self) {
        let mut state = self.state.write().expect("vector index lock poisoned");
        state.entries.clear();
        state.dimension = None;
    }

    /// Cosine similarity of `query` against every stored vector, returning
    /// the top `k` by descending score. `k` is clamped to the stored
    /// count; an empty index returns an empty vec; a zero-norm query or
    /// entry scores 0 for that pair rather than dividing by zero.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredMatch> {
        let state = self.state.read().expect("vector index lock poisoned");
        let query_norm = norm(query);

        let mut scored: Vec<ScoredMatch> = state
            .entries
            .values()
            .map(|entry| ScoredMatch {
                id: entry.id.clone(),
                score: cosine_similarity(query, &entry.vector, query_norm),
                source_text: entry.source_text.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k.min(scored.len()));
        scored
    }

    pub(crate) fn snapshot_entries(&self) -> Vec<VectorEntry> {
        self.state
            .read()
            .expect("vector index lock poisoned")
            .entries
            .values()
            .cloned()
            .collect()
    }

    pub(crate) fn from_entries(entries: Vec<VectorEntry>) -> Self {
        let dimension = entries.first().map(|e| e.vector.len());
        let entries = entries.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            state: RwLock::new(State { entries, dimension }),
        }
    }
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(a: &[f32], b: &[f32], a_norm: f32) -> f32 {
    let b_norm = norm(b);
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}
