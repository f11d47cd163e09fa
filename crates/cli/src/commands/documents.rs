//! Documents command handler.
//!
//! Lists the records visible to the selected patient.

use super::{open_engine, RecordsArgs};
use clap::Args;
use medassist_assistant::MedicalDocument;
use medassist_core::{config::AppConfig, AppError, AppResult};

/// List the records visible to a patient
#[derive(Args, Debug)]
pub struct DocumentsCommand {
    #[command(flatten)]
    pub records: RecordsArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DocumentsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let engine = open_engine(config, &self.records).await?;
        let documents = engine.corpus();

        if self.json {
            let json = serde_json::to_string_pretty(documents)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        if documents.is_empty() {
            println!("No records found");
            return Ok(());
        }

        for doc in documents {
            println!("{}", document_line(doc));
        }

        Ok(())
    }
}

fn document_line(doc: &MedicalDocument) -> String {
    format!(
        "{}  {:<28} {:<18} {:<9} {} ({})",
        doc.date, doc.title, doc.category, doc.status, doc.doctor, doc.department
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_assistant::demo::sample_documents;

    #[test]
    fn test_document_line() {
        let line = document_line(&sample_documents()[0]);
        assert!(line.starts_with("2024-01-15  Complete Blood Panel"));
        assert!(line.contains("lab result"));
        assert!(line.ends_with("Dr. Sarah Johnson (Laboratory)"));
    }
}
