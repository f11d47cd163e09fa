//! Assistant type definitions.

use chrono::{DateTime, NaiveDate, Utc};
use medassist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of medical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    LabResult,
    Prescription,
    VisitSummary,
    Imaging,
    DischargeSummary,
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentCategory::LabResult => "lab result",
            DocumentCategory::Prescription => "prescription",
            DocumentCategory::VisitSummary => "visit summary",
            DocumentCategory::Imaging => "imaging",
            DocumentCategory::DischargeSummary => "discharge summary",
        };
        f.pad(label)
    }
}

/// Clinical status recorded on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalStatus {
    Normal,
    Abnormal,
    Pending,
    Critical,
}

impl fmt::Display for ClinicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClinicalStatus::Normal => "normal",
            ClinicalStatus::Abnormal => "abnormal",
            ClinicalStatus::Pending => "pending",
            ClinicalStatus::Critical => "critical",
        };
        f.pad(label)
    }
}

/// A single medical record visible to one patient.
///
/// Documents are owned by the document provider; the assistant only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDocument {
    pub id: String,

    pub title: String,

    #[serde(rename = "type")]
    pub category: DocumentCategory,

    pub date: NaiveDate,

    /// Authoring clinician
    pub doctor: String,

    pub department: String,

    pub status: ClinicalStatus,

    pub summary: String,

    /// Full document text
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_findings: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl MedicalDocument {
    /// Check the record invariants: non-empty id and content.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Documents(format!(
                "Document '{}' has an empty id",
                self.title
            )));
        }

        if self.content.trim().is_empty() {
            return Err(AppError::Documents(format!(
                "Document '{}' has no content",
                self.id
            )));
        }

        Ok(())
    }

    /// Lower-cased text searched by the relevance rules.
    pub fn haystack(&self) -> String {
        let mut parts = vec![self.title.as_str(), self.content.as_str()];
        parts.extend(self.key_findings.iter().map(String::as_str));
        parts.extend(self.recommendations.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Attribution from an answer back to the document that justified it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    pub document_id: String,

    pub document_title: String,

    /// Excerpt drawn from the document
    pub relevant_section: String,
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    pub role: MessageRole,

    pub content: String,

    pub timestamp: DateTime<Utc>,

    /// Citations; only ever populated on assistant messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceCitation>,
}

impl Message {
    /// Create a user message.
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Create an assistant message with its citations.
    pub fn assistant(
        id: impl Into<String>,
        content: impl Into<String>,
        sources: Vec<SourceCitation>,
    ) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            sources,
        }
    }
}

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantAnswer {
    /// Answer text shown to the user; never empty
    pub response_text: String,

    /// One citation per relevant document, in corpus order
    pub sources: Vec<SourceCitation>,
}
