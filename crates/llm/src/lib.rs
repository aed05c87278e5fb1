//! Chat-completion integration for the inventory tool.
//!
//! Provides a provider-agnostic [`LlmClient`] trait and an OpenAI
//! implementation used by the query bridge to answer questions.
//!
//! # Example
//! ```no_run
//! use inventory_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...")?;
//! let request = LlmRequest::new("Hello, world!", "gpt-4o-mini");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{client_from_settings, create_client};
pub use providers::OpenAiClient;
