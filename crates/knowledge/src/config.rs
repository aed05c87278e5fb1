//! Query bridge configuration.

use crate::embeddings::EmbeddingConfig;
use inventory_core::{AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything needed to build a [`crate::QueryBridge`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Source file indexed as plain text
    pub source_path: PathBuf,

    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Characters of trailing context carried into the next chunk
    pub chunk_overlap: usize,

    /// Separator the text is split on before merging
    pub separator: String,

    /// Chunks retrieved per question
    pub top_k: usize,

    /// Chat model used for answers
    pub chat_model: String,

    /// Sampling temperature; provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Embedding settings
    pub embedding: EmbeddingConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(inventory_core::config::DEFAULT_SOURCE_PATH),
            chunk_size: 1000,
            chunk_overlap: 0,
            separator: "\n\n".to_string(),
            top_k: 5,
            chat_model: "gpt-4o-mini".to_string(),
            temperature: None,
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Default settings for `source_path`.
    pub fn for_source(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    /// Derive the bridge settings from the resolved app config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        let retrieval = &config.retrieval;
        Self {
            source_path: config.source_path.clone(),
            chunk_size: retrieval.chunk_size,
            chunk_overlap: retrieval.chunk_overlap,
            separator: retrieval.separator.clone(),
            top_k: retrieval.top_k,
            chat_model: config.llm.model.clone(),
            temperature: None,
            embedding: EmbeddingConfig::from_settings(
                &config.embedding,
                config.llm.endpoint.clone(),
                config.llm.timeout_secs,
            ),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Knowledge(
                "Chunk size must be greater than zero".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Knowledge(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Knowledge(
                "top_k must be greater than zero".to_string(),
            ));
        }

        self.embedding.validate()
    }
}
