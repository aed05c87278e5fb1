//! Query bridge type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A retrievable piece of the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk identifier
    pub id: String,

    /// Position within the source
    pub position: u32,

    /// Text content
    pub text: String,
}

impl Chunk {
    pub fn new(position: u32, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            position,
            text: text.into(),
        }
    }
}

/// A chunk returned by a search, with its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,

    /// Squared L2 distance; smaller is closer
    pub distance: f32,
}

/// Statistics captured when the bridge is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeStats {
    /// Source file the index was built from
    pub source_path: PathBuf,

    /// Number of chunks indexed
    pub chunks_count: usize,

    /// Source size in bytes
    pub source_bytes: u64,

    /// Embedding provider name
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Chat model used for answers
    pub chat_model: String,

    /// Build duration in seconds
    pub build_secs: f64,

    /// When the index was built
    pub built_at: DateTime<Utc>,
}

/// An answer together with the context it was generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,

    /// Model reply text
    pub text: String,

    /// Retrieved chunks, closest first
    pub sources: Vec<ScoredChunk>,
}
