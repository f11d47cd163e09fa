//! End-to-end answering properties of the engine.

use crate::demo::sample_documents;
use crate::engine::AssistantEngine;
use crate::generator::{TemplateAnswerGenerator, FALLBACK_ANSWER};
use crate::relevance::{select_relevant, MAX_RELEVANT_DOCUMENTS};
use crate::types::{DocumentCategory, MedicalDocument};
use std::sync::Arc;
use std::time::Duration;

fn engine_with(documents: Vec<MedicalDocument>) -> AssistantEngine {
    let mut engine =
        AssistantEngine::new(Arc::new(TemplateAnswerGenerator::new()), Duration::ZERO);
    engine.configure(documents);
    engine
}

/// Corpus cycling through every category so rules hit scattered documents.
fn mixed_corpus(size: usize) -> Vec<MedicalDocument> {
    let categories = [
        DocumentCategory::LabResult,
        DocumentCategory::VisitSummary,
        DocumentCategory::Prescription,
        DocumentCategory::Imaging,
        DocumentCategory::DischargeSummary,
    ];
    let template = sample_documents()[1].clone();

    (0..size)
        .map(|i| {
            let mut doc = template.clone();
            doc.id = format!("doc-{}", i);
            doc.title = format!("Record {}", i);
            doc.category = categories[i % categories.len()];
            doc
        })
        .collect()
}

#[test]
fn test_lab_query_includes_lab_results_in_order() {
    let corpus = mixed_corpus(12);
    let selected = select_relevant("any new LAB work?", &corpus);

    let expected: Vec<&str> = corpus
        .iter()
        .filter(|d| d.category == DocumentCategory::LabResult)
        .take(MAX_RELEVANT_DOCUMENTS)
        .map(|d| d.id.as_str())
        .collect();
    let actual: Vec<&str> = selected.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_selection_never_exceeds_cap() {
    let corpus = mixed_corpus(20);
    for query in [
        "lab",
        "blood pressure",
        "recommendations",
        "lab visit prescription cholesterol",
    ] {
        assert!(select_relevant(query, &corpus).len() <= MAX_RELEVANT_DOCUMENTS);
    }
}

#[tokio::test]
async fn test_no_relevant_documents_means_fallback_and_no_sources() {
    let engine = engine_with(sample_documents());
    let answer = engine.answer("What is the weather today?", &[]).await.unwrap();

    assert_eq!(answer.response_text, FALLBACK_ANSWER);
    assert!(answer.sources.is_empty());
}

#[tokio::test]
async fn test_empty_corpus_scenario() {
    let engine = engine_with(Vec::new());
    let answer = engine.answer("anything", &[]).await.unwrap();

    assert_eq!(answer.response_text, FALLBACK_ANSWER);
    assert!(answer.sources.is_empty());
}

#[tokio::test]
async fn test_vitamin_d_scenario() {
    let mut lab = sample_documents()[0].clone();
    lab.key_findings = vec!["Vitamin D deficiency (28 ng/mL)".to_string()];
    let engine = engine_with(vec![lab]);

    let query = "What did my lab results say about my vitamin D levels?";
    assert_eq!(select_relevant(query, engine.corpus()).len(), 1);

    let answer = engine.answer(query, &[]).await.unwrap();
    assert!(answer.response_text.contains("2024-01-15"));
    assert!(answer.response_text.contains("28 ng/mL"));
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(
        answer.sources[0].relevant_section,
        "Vitamin D deficiency (28 ng/mL)"
    );
}

#[tokio::test]
async fn test_answer_is_deterministic() {
    let engine = engine_with(sample_documents());
    for query in [
        "What were the recommendations from my last visit?",
        "What medications am I currently prescribed?",
        "What was my blood pressure reading?",
    ] {
        let first = engine.answer(query, &[]).await.unwrap();
        let second = engine.answer(query, &[]).await.unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn test_rules_apply_in_priority_order() {
    let engine = engine_with(sample_documents());

    let answer = engine.answer("vitamin d and blood pressure", &[]).await.unwrap();
    assert!(answer
        .response_text
        .starts_with("Based on your recent lab results from 2024-01-15"));

    let answer = engine.answer("any recommendations?", &[]).await.unwrap();
    assert!(answer
        .response_text
        .starts_with("From your last visit on 2024-01-10 with Dr. Michael Brown"));

    let answer = engine
        .answer("blood pressure and my prescription", &[])
        .await
        .unwrap();
    assert!(answer
        .response_text
        .starts_with("Your recent blood pressure readings show an average of 142/88 mmHg"));

    let answer = engine.answer("my prescription", &[]).await.unwrap();
    assert!(answer
        .response_text
        .contains("listed in your 2024-01-10 prescription"));
}

#[tokio::test]
async fn test_excerpts_are_first_key_findings() {
    let engine = engine_with(sample_documents());
    let answer = engine.answer("recommendations", &[]).await.unwrap();

    assert_eq!(answer.sources.len(), 3);
    for (citation, doc) in answer.sources.iter().zip(engine.corpus()) {
        assert_eq!(citation.document_id, doc.id);
        assert_eq!(citation.relevant_section, doc.key_findings[0]);
    }
}

#[tokio::test]
async fn test_sources_only_reference_corpus_documents() {
    let engine = engine_with(mixed_corpus(7));
    let answer = engine
        .answer("lab visit prescription recommendation", &[])
        .await
        .unwrap();

    for citation in &answer.sources {
        assert!(engine.corpus().iter().any(|d| d.id == citation.document_id));
    }
}
