//! LLM provider implementations.

pub mod openai;

pub use openai::{OpenAiClient, DEFAULT_OPENAI_BASE_URL};
