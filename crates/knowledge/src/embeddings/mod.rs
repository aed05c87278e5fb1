//! Embedding generation for the retrieval index.
//!
//! Provider-agnostic: the bridge holds an `Arc<dyn EmbeddingProvider>` built
//! by [`create_provider`] from an [`EmbeddingConfig`].

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{MockProvider, OpenAiEmbeddingProvider};
