//! Command handlers for the medassist CLI.

pub mod ask;
pub mod chat;
pub mod documents;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use documents::DocumentsCommand;

use clap::Args;
use medassist_assistant::{
    demo, AssistantEngine, DocumentProvider, FileDocumentProvider, IdentityScope,
    InMemoryDocumentProvider, SourceCitation,
};
use medassist_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Where the patient's records come from.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordsArgs {
    /// Records file (JSON or YAML) to read documents from
    #[arg(short, long, conflicts_with = "demo")]
    pub records: Option<PathBuf>,

    /// Use the built-in sample records
    #[arg(long)]
    pub demo: bool,

    /// Patient whose records are visible
    #[arg(long)]
    pub patient: Option<String>,
}

impl RecordsArgs {
    /// Resolve the provider and identity from flags, falling back to config.
    pub fn resolve(&self, config: &AppConfig) -> AppResult<(Box<dyn DocumentProvider>, IdentityScope)> {
        if self.demo {
            let patient = self.patient.clone().unwrap_or_else(|| demo::DEMO_PATIENT.to_string());
            let provider =
                InMemoryDocumentProvider::new().with_patient(patient.clone(), demo::sample_documents());
            return Ok((Box::new(provider), IdentityScope::patient(patient)));
        }

        let path = self
            .records
            .clone()
            .or_else(|| config.records.clone())
            .ok_or_else(|| {
                AppError::Config(
                    "No records source. Pass --records <FILE>, set MEDASSIST_RECORDS, or use --demo"
                        .to_string(),
                )
            })?;

        let patient = self
            .patient
            .clone()
            .or_else(|| config.patient.clone())
            .ok_or_else(|| {
                AppError::Config("No patient selected. Pass --patient <ID> or set MEDASSIST_PATIENT".to_string())
            })?;

        Ok((Box::new(FileDocumentProvider::new(path)), IdentityScope::patient(patient)))
    }
}

/// Build an engine and load the corpus of the selected patient.
pub async fn open_engine(config: &AppConfig, records: &RecordsArgs) -> AppResult<AssistantEngine> {
    let (provider, scope) = records.resolve(config)?;
    let mut engine = AssistantEngine::from_config(&config.assistant)?;

    let loaded = engine.load_from(provider.as_ref(), &scope).await?;
    tracing::info!(
        provider = provider.provider_name(),
        patient = %scope.patient_id,
        documents = loaded,
        generator = engine.generator_name(),
        "Session ready"
    );

    Ok(engine)
}

/// Render an answer's citations for the terminal.
pub fn format_sources(sources: &[SourceCitation]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nSources:");
    for source in sources {
        out.push_str(&format!(
            "\n  - {}: {}",
            source.document_title, source.relevant_section
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_records_resolve() {
        let args = RecordsArgs {
            demo: true,
            ..Default::default()
        };
        let engine = open_engine(&AppConfig::default(), &args).await.unwrap();
        assert_eq!(engine.corpus().len(), 3);
    }

    #[test]
    fn test_missing_records_source() {
        let result = RecordsArgs::default().resolve(&AppConfig::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_records_file_requires_patient() {
        let args = RecordsArgs {
            records: Some(PathBuf::from("records.yaml")),
            ..Default::default()
        };
        let result = args.resolve(&AppConfig::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_format_sources() {
        assert_eq!(format_sources(&[]), "");

        let rendered = format_sources(&[SourceCitation {
            document_id: "1".to_string(),
            document_title: "Complete Blood Panel".to_string(),
            relevant_section: "Vitamin D deficiency (28 ng/mL)".to_string(),
        }]);
        assert_eq!(
            rendered,
            "\nSources:\n  - Complete Blood Panel: Vitamin D deficiency (28 ng/mL)"
        );
    }
}
