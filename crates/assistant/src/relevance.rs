//! Keyword relevance selection.
//!
//! Stands in for vector similarity search: a fixed set of category and
//! keyword rules decides which documents answer a question.

use crate::types::{DocumentCategory, MedicalDocument};

/// Maximum number of documents handed to the answer generator.
pub const MAX_RELEVANT_DOCUMENTS: usize = 3;

/// Query keywords that select a whole document category.
const CATEGORY_KEYWORDS: [(&str, DocumentCategory); 3] = [
    ("lab", DocumentCategory::LabResult),
    ("prescription", DocumentCategory::Prescription),
    ("visit", DocumentCategory::VisitSummary),
];

/// Terms that must appear in both the query and the document text.
const SHARED_TERMS: [&str; 3] = ["vitamin d", "blood pressure", "cholesterol"];

/// Select the documents relevant to `query`.
///
/// A document is kept when any rule matches. Corpus order is preserved and
/// the result is capped at [`MAX_RELEVANT_DOCUMENTS`]. Blank queries are the
/// caller's concern and simply match nothing here.
pub fn select_relevant<'a>(query: &str, documents: &'a [MedicalDocument]) -> Vec<&'a MedicalDocument> {
    let query_lower = query.to_lowercase();

    let selected: Vec<&MedicalDocument> = documents
        .iter()
        .filter(|doc| is_relevant(&query_lower, doc))
        .take(MAX_RELEVANT_DOCUMENTS)
        .collect();

    tracing::debug!(
        corpus = documents.len(),
        selected = selected.len(),
        "Relevance selection complete"
    );

    selected
}

/// Test one document against every rule; `query_lower` must already be lower-cased.
fn is_relevant(query_lower: &str, doc: &MedicalDocument) -> bool {
    let category_match = CATEGORY_KEYWORDS
        .iter()
        .any(|(keyword, category)| query_lower.contains(keyword) && doc.category == *category);
    if category_match {
        return true;
    }

    let mentioned: Vec<&str> = SHARED_TERMS
        .iter()
        .copied()
        .filter(|term| query_lower.contains(term))
        .collect();
    if !mentioned.is_empty() {
        let haystack = doc.haystack();
        if mentioned.iter().any(|term| haystack.contains(term)) {
            return true;
        }
    }

    query_lower.contains("recommendation") && !doc.recommendations.is_empty()
}
