//! Vector index abstraction and an exhaustive in-memory implementation.

use crate::types::{Chunk, ScoredChunk};
use inventory_core::{AppError, AppResult};

/// Trait for vector index backends.
pub trait VectorIndex: Send + Sync {
    /// Add a chunk with its embedding.
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()>;

    /// The `top_k` chunks nearest to `query`, closest first.
    fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>>;

    /// Number of indexed chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every chunk.
    fn reset(&mut self);
}

/// Flat index: every search scans all vectors by squared L2 distance.
///
/// Equal distances keep insertion order.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn check_dimensions(&self, vector: &[f32]) -> AppResult<()> {
        if vector.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Dimension mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }
        Ok(())
    }
}

impl VectorIndex for FlatIndex {
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()> {
        self.check_dimensions(&embedding)?;
        self.entries.push((chunk, embedding));
        Ok(())
    }

    fn search(&self, query: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        self.check_dimensions(query)?;

        let mut hits: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                distance: squared_l2(query, embedding),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(top_k);

        Ok(hits)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Squared Euclidean distance between equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
