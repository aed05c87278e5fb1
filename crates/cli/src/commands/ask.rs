//! Ask command handler.
//!
//! Builds the query bridge over the inventory file and answers one question.

use crate::form;
use crate::render::Feedback;
use crate::session;
use clap::Args;
use inventory_core::{config::AppConfig, AppResult};
use inventory_knowledge::Answer;

/// Ask a natural-language question about the inventory
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Print the retrieved context chunks after the answer
    #[arg(long)]
    pub show_sources: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    ///
    /// Bridge failures are reported as a warning, not as a failed command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = match form::question(&self.question) {
            Ok(question) => question,
            Err(e) => {
                println!("{}", Feedback::invalid(&e));
                return Ok(());
            }
        };

        let result = match session::connect_bridge(config).await {
            Ok(bridge) => bridge.answer_with_sources(question).await,
            Err(e) => Err(e),
        };

        if self.json {
            println!("{}", answer_json(question, &config.llm.model, &result)?);
            return Ok(());
        }

        println!(
            "{}",
            Feedback::answer(result.as_ref().map(|answer| answer.text.as_str()))
        );

        if self.show_sources {
            if let Ok(answer) = &result {
                for (rank, source) in answer.sources.iter().enumerate() {
                    println!(
                        "\n[{}] distance {:.4}\n{}",
                        rank + 1,
                        source.distance,
                        source.chunk.text
                    );
                }
            }
        }

        Ok(())
    }
}

fn answer_json(question: &str, model: &str, result: &AppResult<Answer>) -> AppResult<String> {
    let output = match result {
        Ok(answer) => serde_json::json!({
            "question": answer.question,
            "answer": answer.text,
            "model": model,
            "sources": answer.sources,
        }),
        Err(e) => serde_json::json!({
            "question": question,
            "answer": null,
            "model": model,
            "error": e.to_string(),
        }),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::AppError;
    use inventory_knowledge::{Chunk, ScoredChunk};

    #[test]
    fn test_answer_json_success() {
        let answer = Answer {
            question: "Price?".to_string(),
            text: "$19.99".to_string(),
            sources: vec![ScoredChunk {
                chunk: Chunk::new(0, "FNxEraBTeWRiCvtFu,3D Glasses,black,19.99"),
                distance: 0.25,
            }],
        };

        let json: serde_json::Value =
            serde_json::from_str(&answer_json("Price?", "gpt-4o-mini", &Ok(answer)).unwrap())
                .unwrap();

        assert_eq!(json["answer"], "$19.99");
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["sources"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_answer_json_failure() {
        let result: AppResult<Answer> = Err(AppError::Llm("timeout".to_string()));
        let json: serde_json::Value =
            serde_json::from_str(&answer_json("Price?", "gpt-4o-mini", &result).unwrap()).unwrap();

        assert!(json["answer"].is_null());
        assert_eq!(json["error"], "LLM error: timeout");
    }
}
