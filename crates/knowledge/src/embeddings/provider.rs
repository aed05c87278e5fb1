//! Embedding provider trait and factory.

use crate::embeddings::config::EmbeddingConfig;
use crate::embeddings::providers::{MockProvider, OpenAiEmbeddingProvider};
use inventory_core::{AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "mock", "openai")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Knowledge("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
///
/// `openai` needs `api_key`; `mock` ignores it.
pub fn create_provider(
    config: &EmbeddingConfig,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    config.validate()?;

    match config.provider.as_str() {
        "mock" => {
            let provider = MockProvider::new(config.dimensions);
            Ok(Arc::new(provider))
        }

        "openai" => {
            let api_key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Config("OpenAI embedding provider requires API key".to_string())
                })?;
            let provider = OpenAiEmbeddingProvider::new(config, api_key)?;
            Ok(Arc::new(provider))
        }

        other => Err(AppError::Knowledge(format!(
            "Unknown embedding provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_provider() {
        let provider = create_provider(&EmbeddingConfig::mock(384), None).unwrap();
        assert_eq!(provider.provider_name(), "mock");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_openai_provider() {
        let provider = create_provider(&EmbeddingConfig::default(), Some("sk-test")).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "text-embedding-ada-002");
        assert_eq!(provider.dimensions(), 1536);
    }

    #[test]
    fn test_openai_requires_api_key() {
        let result = create_provider(&EmbeddingConfig::default(), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "unknown".to_string(),
            ..EmbeddingConfig::default()
        };

        let result = create_provider(&config, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&EmbeddingConfig::mock(384), None).unwrap();

        let embedding = provider.embed("black 3D glasses").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
