//! Answer generation.
//!
//! Generators turn a question and its relevant documents into answer text.
//! Two implementations exist: a fixed rule table and an LLM-backed one.

pub mod llm;
pub mod template;

pub use llm::LlmAnswerGenerator;
pub use template::TemplateAnswerGenerator;

use crate::types::{MedicalDocument, Message};
use medassist_core::{AppError, AppResult, AssistantConfig};
use std::sync::Arc;

/// Answer returned whenever no document supports the question.
pub const FALLBACK_ANSWER: &str = "I don't have specific information about that in your medical \
records. Please consult with your healthcare provider for detailed medical advice.";

/// Disclaimer appended to answers that interpret records.
pub const PROVIDER_DISCLAIMER: &str =
    "For specific medical advice and interpretation, please consult directly with your healthcare provider.";

/// Produces answer text for a question.
///
/// `relevant` comes from relevance selection and may be empty; `transcript`
/// holds the messages exchanged before this question.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync + std::fmt::Debug {
    /// Generator name (e.g., "template", "llm")
    fn name(&self) -> &str;

    /// Generate a non-empty answer.
    async fn generate(
        &self,
        query: &str,
        relevant: &[&MedicalDocument],
        transcript: &[Message],
    ) -> AppResult<String>;
}

/// Create the answer generator named in the configuration.
pub fn create_generator(config: &AssistantConfig) -> AppResult<Arc<dyn AnswerGenerator>> {
    match config.generator.as_str() {
        "template" => Ok(Arc::new(TemplateAnswerGenerator::new())),

        "llm" => {
            let client =
                medassist_llm::create_client(&config.provider, config.endpoint.as_deref())?;
            Ok(Arc::new(LlmAnswerGenerator::new(
                client,
                config.model.clone(),
                config.history_messages,
            )))
        }

        other => Err(AppError::Config(format!(
            "Unknown answer generator: '{}'. Supported generators: template, llm",
            other
        ))),
    }
}
