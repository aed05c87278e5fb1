//! Prompt rendering for the inventory tool.
//!
//! Templates are Handlebars strings rendered without HTML escaping. The
//! built-in retrieval template places the retrieved inventory context ahead
//! of the user's question.

pub mod builder;
pub mod types;

// Re-export main types
pub use builder::build_rag_prompt;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptTemplate, RAG_TEMPLATE, RAG_TEMPLATE_ID};
