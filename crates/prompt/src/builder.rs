//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptTemplate};
use inventory_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

impl PromptTemplate {
    /// Render the template with the given variables.
    ///
    /// Rendering is strict: a variable referenced by the template but absent
    /// from `variables` is an error rather than an empty string.
    ///
    /// # Example
    /// ```
    /// use inventory_prompt::PromptTemplate;
    /// use std::collections::HashMap;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("context".to_string(), "Glasses, black, $19.99".to_string());
    /// vars.insert("question".to_string(), "How much are the glasses?".to_string());
    ///
    /// let built = PromptTemplate::rag_default().render(&vars).unwrap();
    /// assert!(built.user.ends_with("Question: How much are the glasses?\n"));
    /// ```
    pub fn render(&self, variables: &HashMap<String, String>) -> AppResult<BuiltPrompt> {
        tracing::debug!("Building prompt: {}", self.id);

        let user = render_template(&self.template, variables)?;
        let system = self
            .system
            .as_deref()
            .map(|system| render_template(system, variables))
            .transpose()?;

        Ok(BuiltPrompt::new(
            system,
            user,
            self.id.clone(),
            variables.clone(),
        ))
    }
}

/// Render the built-in retrieval prompt for a question and its context.
pub fn build_rag_prompt(context: &str, question: &str) -> AppResult<BuiltPrompt> {
    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.to_string());
    variables.insert("question".to_string(), question.to_string());

    PromptTemplate::rag_default().render(&variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars);
        assert_eq!(result.unwrap(), "Question: Hello, world!");
    }

    #[test]
    fn test_rag_prompt_exact_layout() {
        let built = build_rag_prompt("row one\n\nrow two", "What is the price?").unwrap();

        assert_eq!(
            built.user,
            "Answer the question based only on the following context:\n\nrow one\n\nrow two\n\nQuestion: What is the price?\n"
        );
        assert!(built.system.is_none());
        assert_eq!(built.metadata.source_template_id, "inventory.rag.default");
    }

    #[test]
    fn test_no_html_escaping() {
        let built = build_rag_prompt("Cable <HDMI> & \"gold\"", "Is it 'gold'?").unwrap();
        assert!(built.user.contains("Cable <HDMI> & \"gold\""));
        assert!(built.user.contains("Is it 'gold'?"));
    }

    #[test]
    fn test_system_message_is_rendered() {
        let template = PromptTemplate::new("t", "{{question}}").with_system("Inventory of {{store}}");
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Q".to_string());
        vars.insert("store".to_string(), "accessories".to_string());

        let built = template.render(&vars).unwrap();
        assert_eq!(built.system.as_deref(), Some("Inventory of accessories"));
        assert_eq!(built.user, "Q");
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_invalid_template() {
        let vars = HashMap::new();
        let result = render_template("{{#if}}", &vars);
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }
}
