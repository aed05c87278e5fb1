//! Configuration management for the inventory tool.
//!
//! Configuration is resolved in layers, later layers winning:
//! - Built-in defaults
//! - YAML config file (`inventory.yaml` or `--config`)
//! - Environment variables
//! - Command-line flags
//!
//! Secrets are never stored in the config file; the file only names the
//! environment variable that holds the API key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "inventory.yaml";

/// Default inventory source file.
pub const DEFAULT_SOURCE_PATH: &str = "data/raw_data/accessories.csv";

/// Environment variable holding the OpenAI credential.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

const KNOWN_PROVIDERS: [&str; 1] = ["openai"];
const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["openai", "mock"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Inventory CSV consumed by both the stock store and the query bridge
    pub source_path: PathBuf,

    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Chat-completion settings
    pub llm: LlmSettings,

    /// Embedding settings for the retrieval index
    pub embedding: EmbeddingSettings,

    /// Chunking and retrieval settings
    pub retrieval: RetrievalSettings,

    /// API key passed explicitly (takes precedence over `llm.api_key_env`)
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmSettings {
    /// Provider name (currently "openai")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional API base URL override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Embedding provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingSettings {
    /// Provider name: "openai" or "mock"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Embedding vector dimensions
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

/// Chunking and retrieval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalSettings {
    /// Maximum chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters of trailing context carried into the next chunk
    #[serde(default)]
    pub chunk_overlap: usize,

    /// Separator the source text is split on before merging
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Number of chunks retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_dimensions() -> usize {
    1536
}

fn default_chunk_size() -> usize {
    1000
}

fn default_separator() -> String {
    "\n\n".to_string()
}

fn default_top_k() -> usize {
    5
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: 0,
            separator: default_separator(),
            top_k: default_top_k(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    source: Option<PathBuf>,
    llm: Option<LlmSettings>,
    embedding: Option<EmbeddingSettings>,
    retrieval: Option<RetrievalSettings>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            config_file: None,
            llm: LlmSettings::default(),
            embedding: EmbeddingSettings::default(),
            retrieval: RetrievalSettings::default(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and environment variables.
    ///
    /// The config file is `config_file` when given, else `INVENTORY_CONFIG`,
    /// else `inventory.yaml` in the working directory if it exists. An
    /// explicitly named file that does not exist is an error.
    ///
    /// Environment variables:
    /// - `INVENTORY_CONFIG`: Path to config file
    /// - `INVENTORY_SOURCE`: Inventory CSV path
    /// - `INVENTORY_MODEL`: Chat model identifier
    /// - `INVENTORY_EMBEDDING_PROVIDER`: Embedding provider ("openai", "mock")
    /// - `OPENAI_BASE_URL`: API base URL override
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use inventory_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Source: {:?}", config.source_path);
    /// ```
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let explicit = config_file.or_else(|| std::env::var("INVENTORY_CONFIG").ok().map(PathBuf::from));

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config = config.merge_yaml(&path)?;
                }
            }
        }

        // Environment variables override YAML config
        if let Ok(source) = std::env::var("INVENTORY_SOURCE") {
            config.source_path = PathBuf::from(source);
        }

        if let Ok(model) = std::env::var("INVENTORY_MODEL") {
            config.llm.model = model;
        }

        if let Ok(provider) = std::env::var("INVENTORY_EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }

        if let Ok(endpoint) = std::env::var("OPENAI_BASE_URL") {
            config.llm.endpoint = Some(endpoint);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents)
            .map(|mut merged| {
                merged.config_file = Some(path.to_path_buf());
                merged
            })
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    /// Merge YAML configuration text into this config.
    pub fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let mut result = self.clone();

        if let Some(source) = config_file.source {
            result.source_path = source;
        }

        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }

        if let Some(embedding) = config_file.embedding {
            result.embedding = embedding;
        }

        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the file.
    pub fn with_overrides(
        mut self,
        source: Option<PathBuf>,
        model: Option<String>,
        embedding_provider: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(source) = source {
            self.source_path = source;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(provider) = embedding_provider {
            self.embedding.provider = provider;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the API key: explicit key first, then the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Resolve the API key or fail with a message naming the env var.
    pub fn require_api_key(&self) -> AppResult<String> {
        self.resolve_api_key().ok_or_else(|| {
            AppError::Config(format!(
                "API key not found in environment variable: {}",
                self.llm.api_key_env
            ))
        })
    }

    /// Validate provider names and retrieval parameters.
    ///
    /// Credentials are checked lazily by [`AppConfig::require_api_key`] so
    /// that stock commands work without one.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        let retrieval = &self.retrieval;
        if retrieval.chunk_size == 0 {
            return Err(AppError::Config(
                "chunkSize must be greater than zero".to_string(),
            ));
        }

        if retrieval.chunk_overlap >= retrieval.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                retrieval.chunk_overlap, retrieval.chunk_size
            )));
        }

        if retrieval.top_k == 0 {
            return Err(AppError::Config("topK must be greater than zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.retrieval.chunk_size, 1000);
        assert_eq!(config.retrieval.chunk_overlap, 0);
        assert_eq!(config.retrieval.top_k, 5);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("stock.csv")),
            Some("gpt-4o".to_string()),
            Some("mock".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.source_path, PathBuf::from("stock.csv"));
        assert_eq!(overridden.llm.model, "gpt-4o");
        assert_eq!(overridden.embedding.provider, "mock");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml_partial_sections() {
        let yaml = r#"
source: inventory/items.csv
llm:
  model: gpt-4o
retrieval:
  chunkSize: 400
  topK: 3
logging:
  level: warn
  color: false
"#;
        let merged = AppConfig::default().merge_yaml_str(yaml).unwrap();

        assert_eq!(merged.source_path, PathBuf::from("inventory/items.csv"));
        assert_eq!(merged.llm.model, "gpt-4o");
        // Unset fields inside a section fall back to their defaults
        assert_eq!(merged.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(merged.retrieval.chunk_size, 400);
        assert_eq!(merged.retrieval.separator, "\n\n");
        assert_eq!(merged.retrieval.top_k, 3);
        assert_eq!(merged.embedding, EmbeddingSettings::default());
        assert_eq!(merged.log_level, Some("warn".to_string()));
        assert!(merged.no_color);
    }

    #[test]
    fn test_merge_yaml_file_records_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "embedding:\n  provider: mock\n  dimensions: 64").unwrap();

        let merged = AppConfig::default().merge_yaml(file.path()).unwrap();
        assert_eq!(merged.config_file.as_deref(), Some(file.path()));
        assert_eq!(merged.embedding.provider, "mock");
        assert_eq!(merged.embedding.dimensions, 64);
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let result = AppConfig::default().merge_yaml_str("retrieval: [1, 2");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = AppConfig::load(Some(PathBuf::from("/nonexistent/inventory.yaml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.llm.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_embedding_provider() {
        let mut config = AppConfig::default();
        config.embedding.provider = "faiss".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_overlap_not_smaller_than_chunk() {
        let mut config = AppConfig::default();
        config.retrieval.chunk_size = 100;
        config.retrieval.chunk_overlap = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-test".to_string());
        config.llm.api_key_env = "INVENTORY_TEST_UNSET_KEY_VAR".to_string();
        assert_eq!(config.resolve_api_key(), Some("sk-test".to_string()));
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_require_api_key_names_env_var() {
        let mut config = AppConfig::default();
        config.llm.api_key_env = "INVENTORY_TEST_UNSET_KEY_VAR".to_string();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("INVENTORY_TEST_UNSET_KEY_VAR"));
    }
}
