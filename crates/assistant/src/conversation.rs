//! Conversation transcript.
//!
//! Owns the append-only message history of one chat session and drives the
//! engine one question at a time.

use crate::engine::AssistantEngine;
use crate::types::Message;
use medassist_core::{AppError, AppResult};

/// Opening assistant message of every conversation.
pub const GREETING: &str = "Hello! I'm your AI Medical Assistant. I can help you understand your \
medical records, lab results, and visit summaries. Feel free to ask me questions like 'What were \
the recommendations from my last visit?' or 'What did my lab results say about my vitamin D levels?'";

/// Shown in place of an answer when the engine fails.
pub const ERROR_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What were the recommendations from my last visit?",
    "What did my lab results say about my vitamin D levels?",
    "What medications am I currently prescribed?",
    "What was my blood pressure reading?",
    "Are there any abnormal findings in my recent tests?",
];

/// Example questions offered to a new user.
pub fn suggested_questions() -> &'static [&'static str] {
    &SUGGESTED_QUESTIONS
}

/// An ordered, append-only transcript.
///
/// `send` takes `&mut self`, so a conversation can only have one question
/// in flight.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation containing only the greeting.
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        let id = conversation.allocate_id();
        conversation
            .messages
            .push(Message::assistant(id, GREETING, Vec::new()));
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Ask the engine a question and append both sides of the exchange.
    ///
    /// Returns the assistant message that was appended. A blank question is
    /// rejected with `AppError::Query` and leaves the transcript untouched.
    /// Any other engine failure is logged and recorded as [`ERROR_REPLY`].
    pub async fn send(&mut self, engine: &AssistantEngine, text: &str) -> AppResult<&Message> {
        if text.trim().is_empty() {
            return Err(AppError::Query("question must not be empty".to_string()));
        }

        let prior_len = self.messages.len();
        let id = self.allocate_id();
        self.messages.push(Message::user(id, text));

        let result = engine.answer(text, &self.messages[..prior_len]).await;
        let reply = match result {
            Ok(answer) => Message::assistant(self.allocate_id(), answer.response_text, answer.sources),
            Err(e) => {
                tracing::warn!("Failed to answer question: {}", e);
                Message::assistant(self.allocate_id(), ERROR_REPLY, Vec::new())
            }
        };
        self.messages.push(reply);

        let last = self.messages.len() - 1;
        Ok(&self.messages[last])
    }

    /// End the session: drop the history and start over with the greeting.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}
