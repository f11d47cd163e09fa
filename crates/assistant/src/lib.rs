//! Medical records question answering.
//!
//! Answers a patient's questions from the records visible to them:
//! keyword relevance selection picks up to three documents, an
//! [`AnswerGenerator`] writes the answer, and every selected document is
//! cited back to the user.
//!
//! ```no_run
//! use medassist_assistant::{demo, AssistantEngine, TemplateAnswerGenerator};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> medassist_core::AppResult<()> {
//! let mut engine = AssistantEngine::new(Arc::new(TemplateAnswerGenerator::new()), Duration::ZERO);
//! engine.configure(demo::sample_documents());
//!
//! let answer = engine.answer("What did my lab results say about my vitamin D levels?", &[]).await?;
//! println!("{}", answer.response_text);
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod demo;
pub mod engine;
pub mod generator;
pub mod provider;
pub mod relevance;
pub mod sources;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use conversation::{suggested_questions, Conversation};
pub use engine::AssistantEngine;
pub use generator::{
    create_generator, AnswerGenerator, LlmAnswerGenerator, TemplateAnswerGenerator,
    FALLBACK_ANSWER,
};
pub use provider::{DocumentProvider, FileDocumentProvider, IdentityScope, InMemoryDocumentProvider};
pub use relevance::{select_relevant, MAX_RELEVANT_DOCUMENTS};
pub use sources::extract_citation;
pub use types::{
    AssistantAnswer, ClinicalStatus, DocumentCategory, MedicalDocument, Message, MessageRole,
    SourceCitation,
};
