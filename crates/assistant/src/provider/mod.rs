//! Document providers.
//!
//! A provider returns the records visible to one identity. Results are
//! trusted as already authorized; the assistant performs no access checks.

pub mod file;

pub use file::FileDocumentProvider;

use crate::types::MedicalDocument;
use medassist_core::AppResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity whose records make up the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityScope {
    pub patient_id: String,
}

impl IdentityScope {
    pub fn patient(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
        }
    }
}

/// Source of the documents visible to an identity.
#[async_trait::async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Provider name for logging (e.g., "memory", "file")
    fn provider_name(&self) -> &str;

    /// Documents for `scope`, in display order. Unknown identities get an empty list.
    async fn documents(&self, scope: &IdentityScope) -> AppResult<Vec<MedicalDocument>>;
}

/// Provider backed by an in-memory map of patient id to records.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentProvider {
    records: HashMap<String, Vec<MedicalDocument>>,
}

impl InMemoryDocumentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the records of one patient, replacing any previous set.
    pub fn with_patient(mut self, patient_id: impl Into<String>, documents: Vec<MedicalDocument>) -> Self {
        self.records.insert(patient_id.into(), documents);
        self
    }
}

#[async_trait::async_trait]
impl DocumentProvider for InMemoryDocumentProvider {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn documents(&self, scope: &IdentityScope) -> AppResult<Vec<MedicalDocument>> {
        let documents = self
            .records
            .get(&scope.patient_id)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            patient = %scope.patient_id,
            documents = documents.len(),
            "Loaded documents from memory"
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_documents;

    #[tokio::test]
    async fn test_in_memory_scopes_by_patient() {
        let provider = InMemoryDocumentProvider::new()
            .with_patient("a", sample_documents())
            .with_patient("b", sample_documents()[..1].to_vec());

        assert_eq!(provider.documents(&IdentityScope::patient("a")).await.unwrap().len(), 3);
        assert_eq!(provider.documents(&IdentityScope::patient("b")).await.unwrap().len(), 1);
        assert!(provider
            .documents(&IdentityScope::patient("c"))
            .await
            .unwrap()
            .is_empty());
    }
}
