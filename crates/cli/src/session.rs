//! Wiring from the resolved config to the store and the query bridge.

use inventory_core::{AppConfig, AppResult};
use inventory_knowledge::{create_provider, BridgeConfig, QueryBridge};
use inventory_llm::client_from_settings;
use inventory_stock::StockStore;

/// Ingest the configured source. Never fails: an unreadable file yields an
/// unavailable store.
pub fn open_store(config: &AppConfig) -> StockStore {
    tracing::debug!("Source: {}", config.source_path.display());
    StockStore::open(&config.source_path)
}

/// Build the query bridge over the configured source.
///
/// Requires the API key; the chat model is always hosted.
pub async fn connect_bridge(config: &AppConfig) -> AppResult<QueryBridge> {
    let bridge_config = BridgeConfig::from_app_config(config);
    bridge_config.validate()?;

    let api_key = config.require_api_key()?;

    let embedder = create_provider(&bridge_config.embedding, Some(&api_key))?;
    let llm = client_from_settings(&config.llm, Some(&api_key))?;

    tracing::debug!(
        "Bridge: provider={}, model={}, embeddings={}/{}",
        llm.provider_name(),
        bridge_config.chat_model,
        embedder.provider_name(),
        embedder.model_name()
    );

    QueryBridge::build(&bridge_config, embedder, llm).await
}
