//! Retrieval-augmented query bridge.
//!
//! Built once per source file: the text is loaded, chunked, embedded and put
//! into a flat index. Each question is embedded, the nearest chunks are
//! joined into a context block, and the rendered prompt goes to the chat
//! model. The index is a snapshot of the file at build time; later stock
//! updates in the record store are not visible here.

use crate::chunker;
use crate::config::BridgeConfig;
use crate::embeddings::EmbeddingProvider;
use crate::loader;
use crate::types::{Answer, BridgeStats, ScoredChunk};
use crate::vector_index::{FlatIndex, VectorIndex};
use chrono::Utc;
use inventory_core::{AppError, AppResult};
use inventory_llm::{LlmClient, LlmRequest};
use inventory_prompt::build_rag_prompt;
use std::sync::Arc;
use std::time::Instant;

/// Separator placed between retrieved chunks in the prompt context.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Answers free-text questions about the source file.
pub struct QueryBridge {
    config: BridgeConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmClient>,
    index: FlatIndex,
    stats: BridgeStats,
}

impl std::fmt::Debug for QueryBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBridge")
            .field("config", &self.config)
            .field("llm", &self.llm.provider_name())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl QueryBridge {
    /// Load, chunk, embed and index the configured source file.
    ///
    /// # Errors
    /// `AppError::Knowledge` if the file is missing, unreadable or has no
    /// text; any embedding provider error is passed through.
    #[tracing::instrument(name = "bridge_build", skip_all, fields(source = %config.source_path.display()))]
    pub async fn build(
        config: &BridgeConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
    ) -> AppResult<Self> {
        config.validate()?;

        let start = Instant::now();
        tracing::info!("Loading and processing document...");

        let text = loader::load_text(&config.source_path)?;
        let chunks = chunker::chunk_text(
            &text,
            config.chunk_size,
            config.chunk_overlap,
            &config.separator,
        );

        if chunks.is_empty() {
            return Err(AppError::Knowledge(format!(
                "No text to index in {}",
                config.source_path.display()
            )));
        }

        tracing::info!(
            "Embedding {} chunks using provider '{}' (model: {})",
            chunks.len(),
            embedder.provider_name(),
            embedder.model_name()
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(AppError::Knowledge(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut index = FlatIndex::new(embedder.dimensions());
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            index.insert(chunk, embedding)?;
        }

        let build_secs = start.elapsed().as_secs_f64();
        tracing::info!("Document loaded and processed in {:.2} seconds", build_secs);

        let stats = BridgeStats {
            source_path: config.source_path.clone(),
            chunks_count: index.len(),
            source_bytes: text.len() as u64,
            embedding_provider: embedder.provider_name().to_string(),
            embedding_model: embedder.model_name().to_string(),
            chat_model: config.chat_model.clone(),
            build_secs,
            built_at: Utc::now(),
        };

        Ok(Self {
            config: config.clone(),
            embedder,
            llm,
            index,
            stats,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }

    /// The `top_k` chunks closest to `question`, closest first.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve(&self, question: &str) -> AppResult<Vec<ScoredChunk>> {
        if question.trim().is_empty() {
            return Err(AppError::Knowledge("Question must not be empty".to_string()));
        }

        if self.index.is_empty() {
            return Err(AppError::Knowledge("Index is empty".to_string()));
        }

        let query = self.embedder.embed(question).await?;
        let hits = self.index.search(&query, self.config.top_k)?;

        tracing::debug!(
            "Retrieved {} chunks - distances: {:?}",
            hits.len(),
            hits.iter().map(|h| h.distance).collect::<Vec<_>>()
        );

        Ok(hits)
    }

    /// Answer `question` from the indexed context.
    ///
    /// A single attempt: network, credential and API failures come back as
    /// `AppError::Llm` with no retry.
    pub async fn answer(&self, question: &str) -> AppResult<String> {
        self.answer_with_sources(question).await.map(|answer| answer.text)
    }

    /// Like [`QueryBridge::answer`], also returning the retrieved chunks.
    #[tracing::instrument(name = "query", skip(self))]
    pub async fn answer_with_sources(&self, question: &str) -> AppResult<Answer> {
        tracing::info!("Running query: {}", question);

        let sources = self.retrieve(question).await?;
        let context = format_context(&sources);
        let prompt = build_rag_prompt(&context, question)?;

        let mut request = LlmRequest::new(prompt.user, &self.config.chat_model);
        if let Some(system) = prompt.system {
            request = request.with_system(system);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.llm.complete(&request).await?;
        let text = response.content.trim().to_string();

        if text.is_empty() {
            return Err(AppError::Llm("Model returned an empty answer".to_string()));
        }

        tracing::info!("Query completed. Response: {}", text);

        Ok(Answer {
            question: question.to_string(),
            text,
            sources,
        })
    }
}

/// Join chunk texts, closest first.
fn format_context(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .map(|hit| hit.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    #[test]
    fn test_format_context() {
        let hits = vec![
            ScoredChunk {
                chunk: Chunk::new(0, "A1,Glasses"),
                distance: 0.1,
            },
            ScoredChunk {
                chunk: Chunk::new(1, "B2,Cable"),
                distance: 0.5,
            },
        ];

        assert_eq!(format_context(&hits), "A1,Glasses\n\nB2,Cable");
        assert_eq!(format_context(&[]), "");
    }
}
