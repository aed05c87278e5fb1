//! Retrieval-augmented question answering over the inventory file.
//!
//! The [`QueryBridge`] indexes the source file as plain text in memory and
//! answers questions with a hosted chat model, using the closest chunks as
//! context.
//!
//! # Example
//! ```no_run
//! use inventory_knowledge::{create_provider, BridgeConfig, QueryBridge};
//! use inventory_llm::create_client;
//!
//! # async fn example() -> inventory_core::AppResult<()> {
//! let config = BridgeConfig::for_source("data/raw_data/accessories.csv");
//! let key = std::env::var("OPENAI_API_KEY").ok();
//! let embedder = create_provider(&config.embedding, key.as_deref())?;
//! let llm = create_client("openai", None, key.as_deref())?;
//!
//! let bridge = QueryBridge::build(&config, embedder, llm).await?;
//! println!("{}", bridge.answer("What is the price of the black 3D glasses?").await?);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod loader;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use bridge::QueryBridge;
pub use config::BridgeConfig;
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use types::{Answer, BridgeStats, Chunk, ScoredChunk};
pub use vector_index::{FlatIndex, VectorIndex};
