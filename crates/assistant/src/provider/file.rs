//! File-backed document provider.
//!
//! Reads a records file in JSON or YAML:
//!
//! ```yaml
//! patients:
//!   p-100:
//!     - id: "1"
//!       title: Complete Blood Panel
//!       type: lab_result
//!       date: 2024-01-15
//!       ...
//! ```

use super::{DocumentProvider, IdentityScope};
use crate::types::MedicalDocument;
use medassist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// On-disk layout of a records file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsFile {
    #[serde(default)]
    pub patients: HashMap<String, Vec<MedicalDocument>>,
}

impl RecordsFile {
    /// Parse records, choosing JSON or YAML by file extension.
    pub fn parse(contents: &str, path: &Path) -> AppResult<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let records: RecordsFile = if is_json {
            serde_json::from_str(contents).map_err(|e| {
                AppError::Documents(format!("Failed to parse records file {:?}: {}", path, e))
            })?
        } else {
            serde_yaml::from_str(contents).map_err(|e| {
                AppError::Documents(format!("Failed to parse records file {:?}: {}", path, e))
            })?
        };

        for documents in records.patients.values() {
            for doc in documents {
                doc.validate()?;
            }
        }

        Ok(records)
    }
}

/// Provider that re-reads a records file on every request.
#[derive(Debug, Clone)]
pub struct FileDocumentProvider {
    path: PathBuf,
}

impl FileDocumentProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<RecordsFile> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Documents(format!("Failed to read records file {:?}: {}", self.path, e))
        })?;
        RecordsFile::parse(&contents, &self.path)
    }
}

#[async_trait::async_trait]
impl DocumentProvider for FileDocumentProvider {
    fn provider_name(&self) -> &str {
        "file"
    }

    async fn documents(&self, scope: &IdentityScope) -> AppResult<Vec<MedicalDocument>> {
        let mut records = self.load().await?;
        let documents = records
            .patients
            .remove(&scope.patient_id)
            .unwrap_or_default();

        tracing::debug!(
            path = ?self.path,
            patient = %scope.patient_id,
            documents = documents.len(),
            "Loaded documents from records file"
        );
        Ok(documents)
    }
}
