//! Question answering orchestration.
//!
//! Sequences relevance selection, answer generation and citation extraction
//! over the corpus of one session.

use crate::generator::{create_generator, AnswerGenerator};
use crate::provider::{DocumentProvider, IdentityScope};
use crate::relevance::select_relevant;
use crate::sources::extract_citations;
use crate::types::{AssistantAnswer, MedicalDocument, Message};
use medassist_core::{AppError, AppResult, AssistantConfig};
use std::sync::Arc;
use std::time::Duration;

/// Session-scoped answering engine.
///
/// Holds the corpus of one identity. `configure` needs `&mut self` while
/// `answer` borrows shared, so the corpus cannot change under a running query.
#[derive(Debug)]
pub struct AssistantEngine {
    generator: Arc<dyn AnswerGenerator>,
    corpus: Arc<[MedicalDocument]>,
    latency: Duration,
}

impl AssistantEngine {
    /// Create an engine with an empty corpus.
    ///
    /// `latency` is waited before each answer; pass `Duration::ZERO` to
    /// answer immediately.
    pub fn new(generator: Arc<dyn AnswerGenerator>, latency: Duration) -> Self {
        Self {
            generator,
            corpus: Arc::from(Vec::new()),
            latency,
        }
    }

    /// Build an engine from the assistant configuration.
    pub fn from_config(config: &AssistantConfig) -> AppResult<Self> {
        let generator = create_generator(config)?;
        Ok(Self::new(generator, Duration::from_millis(config.latency_ms)))
    }

    /// Replace the active corpus wholesale.
    pub fn configure(&mut self, documents: Vec<MedicalDocument>) {
        tracing::info!(documents = documents.len(), "Corpus configured");
        self.corpus = documents.into();
    }

    /// Fetch the corpus for `scope` from a provider and make it active.
    ///
    /// Returns the number of documents loaded.
    pub async fn load_from(
        &mut self,
        provider: &dyn DocumentProvider,
        scope: &IdentityScope,
    ) -> AppResult<usize> {
        let documents = provider.documents(scope).await?;
        let count = documents.len();
        self.configure(documents);
        Ok(count)
    }

    /// Documents currently visible to the session.
    pub fn corpus(&self) -> &[MedicalDocument] {
        &self.corpus
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Answer `query` against the active corpus.
    ///
    /// `transcript` is the conversation before this question. A blank query
    /// is rejected with `AppError::Query`; an empty corpus is not an error
    /// and yields the fallback answer with no sources.
    pub async fn answer(&self, query: &str, transcript: &[Message]) -> AppResult<AssistantAnswer> {
        if query.trim().is_empty() {
            return Err(AppError::Query("question must not be empty".to_string()));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let relevant = select_relevant(query, &self.corpus);
        let response_text = self
            .generator
            .generate(query, &relevant, transcript)
            .await?;
        let sources = extract_citations(&relevant);

        tracing::info!(
            generator = self.generator.name(),
            relevant = relevant.len(),
            transcript = transcript.len(),
            "Answered question"
        );

        Ok(AssistantAnswer {
            response_text,
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_documents;
    use crate::generator::{TemplateAnswerGenerator, FALLBACK_ANSWER};
    use crate::provider::InMemoryDocumentProvider;

    fn engine() -> AssistantEngine {
        AssistantEngine::new(Arc::new(TemplateAnswerGenerator::new()), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_unconfigured_engine_falls_back() {
        let answer = engine().answer("lab results", &[]).await.unwrap();
        assert_eq!(answer.response_text, FALLBACK_ANSWER);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let mut engine = engine();
        engine.configure(sample_documents());

        for query in ["", "   ", "\n\t"] {
            let result = engine.answer(query, &[]).await;
            assert!(matches!(result, Err(AppError::Query(_))));
        }
    }

    #[tokio::test]
    async fn test_sources_follow_relevant_documents() {
        let mut engine = engine();
        engine.configure(sample_documents());

        let answer = engine.answer("any cholesterol issues?", &[]).await.unwrap();
        let ids: Vec<&str> = answer.sources.iter().map(|s| s.document_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_configure_replaces_corpus() {
        let mut engine = engine();
        engine.configure(sample_documents());
        assert_eq!(engine.corpus().len(), 3);

        engine.configure(sample_documents()[2..].to_vec());
        let answer = engine.answer("lab", &[]).await.unwrap();
        assert_eq!(answer.response_text, FALLBACK_ANSWER);
    }

    #[test]
    fn test_configure_swaps_whole_corpus() {
        let mut engine = engine();
        engine.configure(sample_documents());
        let before = engine.corpus().as_ptr();

        engine.configure(sample_documents()[..1].to_vec());
        assert_eq!(engine.corpus().len(), 1);
        assert_eq!(engine.corpus()[0].id, "1");
        assert_ne!(engine.corpus().as_ptr(), before);
    }

    #[tokio::test]
    async fn test_load_from_provider() {
        let provider = InMemoryDocumentProvider::new().with_patient("p-1", sample_documents());
        let mut engine = engine();

        let loaded = engine
            .load_from(&provider, &IdentityScope::patient("p-1"))
            .await
            .unwrap();
        assert_eq!(loaded, 3);

        let loaded = engine
            .load_from(&provider, &IdentityScope::patient("someone-else"))
            .await
            .unwrap();
        assert_eq!(loaded, 0);
        assert!(engine.corpus().is_empty());
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let mut engine = AssistantEngine::new(
            Arc::new(TemplateAnswerGenerator::new()),
            Duration::from_millis(30),
        );
        engine.configure(sample_documents());

        let started = std::time::Instant::now();
        engine.answer("lab", &[]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_from_config() {
        let engine = AssistantEngine::from_config(&AssistantConfig::default()).unwrap();
        assert_eq!(engine.generator_name(), "template");
        assert!(engine.corpus().is_empty());
    }
}
