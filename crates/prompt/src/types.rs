//! Prompt types for the inventory tool.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of the built-in retrieval prompt.
pub const RAG_TEMPLATE_ID: &str = "inventory.rag.default";

/// Body of the built-in retrieval prompt. Expects `context` and `question`.
pub const RAG_TEMPLATE: &str = "Answer the question based only on the following context:\n\n{{context}}\n\nQuestion: {{question}}\n";

/// A Handlebars prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Unique template identifier
    pub id: String,

    /// Optional system message, rendered with the same variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// User message template with Handlebars syntax
    pub template: String,
}

impl PromptTemplate {
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system: None,
            template: template.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// The fixed question-answering template: retrieved context, then the question.
    pub fn rag_default() -> Self {
        Self::new(RAG_TEMPLATE_ID, RAG_TEMPLATE)
    }
}

/// A fully rendered prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source template ID
    #[serde(rename = "sourceTemplateId")]
    pub source_template_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

impl BuiltPrompt {
    pub fn new(
        system: Option<String>,
        user: String,
        source_template_id: String,
        resolved_variables: HashMap<String, String>,
    ) -> Self {
        Self {
            system,
            user,
            metadata: BuiltPromptMetadata {
                source_template_id,
                resolved_variables,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_default() {
        let template = PromptTemplate::rag_default();
        assert_eq!(template.id, RAG_TEMPLATE_ID);
        assert!(template.system.is_none());
        assert!(template.template.contains("{{context}}"));
        assert!(template.template.contains("{{question}}"));
    }

    #[test]
    fn test_built_prompt_serialization() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "test".to_string());

        let built = BuiltPrompt::new(None, "User message".to_string(), "t".to_string(), vars);
        let json = serde_json::to_value(&built).unwrap();

        assert_eq!(json["user"], "User message");
        assert_eq!(json["metadata"]["sourceTemplateId"], "t");
        assert_eq!(json["metadata"]["resolvedVariables"]["question"], "test");
    }
}
