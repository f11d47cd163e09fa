//! LLM-backed answer generator.
//!
//! Grounds a language model on the relevant records and the recent
//! transcript. The fallback answer and provider disclaimer are enforced
//! around the model so it never answers without either a matched document
//! or a disclaimer.

use super::{AnswerGenerator, FALLBACK_ANSWER, PROVIDER_DISCLAIMER};
use crate::types::{MedicalDocument, Message, MessageRole};
use medassist_core::{AppError, AppResult};
use medassist_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Sampling temperature for record-grounded answers.
const ANSWER_TEMPERATURE: f32 = 0.2;

const MAX_ANSWER_TOKENS: u32 = 800;

/// Answer generator that delegates synthesis to an [`LlmClient`].
pub struct LlmAnswerGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    history_messages: usize,
}

impl std::fmt::Debug for LlmAnswerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmAnswerGenerator")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .field("history_messages", &self.history_messages)
            .finish()
    }
}

impl LlmAnswerGenerator {
    /// Create a generator; `history_messages` caps how much transcript is forwarded.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, history_messages: usize) -> Self {
        Self {
            client,
            model: model.into(),
            history_messages,
        }
    }

    /// Build the completion request for a question.
    pub fn build_request(
        &self,
        query: &str,
        relevant: &[&MedicalDocument],
        transcript: &[Message],
    ) -> LlmRequest {
        let mut prompt = String::new();

        let history = recent_history(transcript, self.history_messages);
        if !history.is_empty() {
            prompt.push_str("Conversation so far:\n");
            prompt.push_str(&history);
            prompt.push_str("\n\n");
        }

        prompt.push_str("Patient question:\n");
        prompt.push_str(query.trim());
        prompt.push_str("\n\nRelevant medical records:\n");
        prompt.push_str(&build_context(relevant));

        LlmRequest::new(prompt, self.model.clone())
            .with_system(build_system_prompt())
            .with_temperature(ANSWER_TEMPERATURE)
            .with_max_tokens(MAX_ANSWER_TOKENS)
    }
}

/// Render the relevant records as numbered context blocks.
fn build_context(relevant: &[&MedicalDocument]) -> String {
    relevant
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let mut block = format!(
                "[Record {}] {} ({}, {})\nAuthor: {}, {}\nStatus: {}\nSummary: {}\nContent: {}",
                i + 1,
                doc.title,
                doc.category,
                doc.date,
                doc.doctor,
                doc.department,
                doc.status,
                doc.summary,
                doc.content
            );
            if !doc.key_findings.is_empty() {
                block.push_str(&format!("\nKey findings: {}", doc.key_findings.join("; ")));
            }
            if !doc.recommendations.is_empty() {
                block.push_str(&format!(
                    "\nRecommendations: {}",
                    doc.recommendations.join("; ")
                ));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Last `limit` transcript messages as "Role: text" lines.
fn recent_history(transcript: &[Message], limit: usize) -> String {
    let start = transcript.len().saturating_sub(limit);
    transcript[start..]
        .iter()
        .map(|message| {
            let speaker = match message.role {
                MessageRole::User => "Patient",
                MessageRole::Assistant => "Assistant",
            };
            format!("{}: {}", speaker, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_system_prompt() -> String {
    format!(
        "You are a medical records assistant helping a patient understand their own records.\n\n\
         Instructions:\n\
         - Answer only from the records provided; never invent values, diagnoses or dosages\n\
         - Mention the record date when you quote a finding\n\
         - If the records do not answer the question, say so plainly\n\
         - Do not give treatment decisions; end with: \"{}\"\n",
        PROVIDER_DISCLAIMER
    )
}

#[async_trait::async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    fn name(&self) -> &str {
        "llm"
    }

    async fn generate(
        &self,
        query: &str,
        relevant: &[&MedicalDocument],
        transcript: &[Message],
    ) -> AppResult<String> {
        if relevant.is_empty() {
            tracing::debug!("No relevant records, skipping model call");
            return Ok(FALLBACK_ANSWER.to_string());
        }

        let request = self.build_request(query, relevant, transcript);
        tracing::debug!(
            provider = self.client.provider_name(),
            model = %self.model,
            records = relevant.len(),
            "Generating answer with LLM"
        );

        let response = self.client.complete(&request).await?;
        let answer = response.content.trim();

        if answer.is_empty() {
            return Err(AppError::Llm("Model returned an empty answer".to_string()));
        }

        if answer.contains(PROVIDER_DISCLAIMER) {
            Ok(answer.to_string())
        } else {
            Ok(format!("{}\n\n{}", answer, PROVIDER_DISCLAIMER))
        }
    }
}
