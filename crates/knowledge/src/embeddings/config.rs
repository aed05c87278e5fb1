//! Embedding configuration.

use inventory_core::config::EmbeddingSettings;
use inventory_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const KNOWN_PROVIDERS: [&str; 2] = ["openai", "mock"];

/// Embedding configuration for the retrieval index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "openai" or "mock"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Maximum texts per embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// API base URL override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_batch_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-ada-002".to_string(),
            dimensions: 1536,
            batch_size: default_batch_size(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Offline configuration backed by the trigram provider.
    pub fn mock(dimensions: usize) -> Self {
        Self {
            provider: "mock".to_string(),
            model: "trigram-v1".to_string(),
            dimensions,
            ..Self::default()
        }
    }

    /// Build from the `embedding` section of the app config.
    pub fn from_settings(
        settings: &EmbeddingSettings,
        endpoint: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            batch_size: default_batch_size(),
            endpoint,
            timeout_secs,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Knowledge(format!(
                "Unknown embedding provider: '{}'. Supported providers: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.dimensions == 0 {
            return Err(AppError::Knowledge(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(AppError::Knowledge(
                "Embedding batch size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "text-embedding-ada-002");
        assert_eq!(config.dimensions, 1536);
        assert_eq!(config.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_settings() {
        let settings = EmbeddingSettings {
            provider: "mock".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 64,
        };

        let config = EmbeddingConfig::from_settings(&settings, Some("http://localhost:9000".into()), 5);
        assert_eq!(config.provider, "mock");
        assert_eq!(config.dimensions, 64);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "ollama".to_string(),
            ..EmbeddingConfig::default()
        };

        let result = config.validate();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let config = EmbeddingConfig::mock(0);
        assert!(config.validate().is_err());
    }
}
