//! Ask command handler.
//!
//! Answers a single question against the selected patient's records.

use super::{format_sources, open_engine, RecordsArgs};
use clap::Args;
use medassist_core::{config::AppConfig, AppError, AppResult};

/// Ask one question about a patient's records
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    #[command(flatten)]
    pub records: RecordsArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::debug!("Ask command options: {:?}", self);

        let engine = open_engine(config, &self.records).await?;
        let answer = engine.answer(&self.question, &[]).await?;

        if self.json {
            let json = serde_json::to_string_pretty(&answer)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}{}", answer.response_text, format_sources(&answer.sources));
        }

        Ok(())
    }
}
