//! LLM provider factory.
//!
//! Resolves a provider name from configuration into a client, checking that
//! the credential the provider needs is present.

use crate::client::LlmClient;
use crate::providers::{OpenAiClient, DEFAULT_OPENAI_BASE_URL};
use inventory_core::config::LlmSettings;
use inventory_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client with the default request timeout.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai")
/// * `endpoint` - Optional custom API base URL
/// * `api_key` - API key (required by "openai")
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or the key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    build(provider, endpoint, api_key, None)
}

/// Create an LLM client from the `llm` section of the config.
pub fn client_from_settings(
    settings: &LlmSettings,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    build(
        &settings.provider,
        settings.endpoint.as_deref(),
        api_key,
        Some(Duration::from_secs(settings.timeout_secs)),
    )
}

fn build(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Option<Duration>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| AppError::Config("OpenAI provider requires API key".to_string()))?;
            let base_url = endpoint.unwrap_or(DEFAULT_OPENAI_BASE_URL);
            let client = match timeout {
                Some(timeout) => OpenAiClient::with_timeout(base_url, api_key, timeout)?,
                None => OpenAiClient::with_base_url(base_url, api_key)?,
            };
            tracing::debug!("Created OpenAI client for {}", base_url);
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}
