//! medassist CLI
//!
//! Main entry point for the medassist command-line tool: ask questions about
//! a patient's medical records and get answers with cited sources.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, DocumentsCommand};
use medassist_core::{
    config::{AppConfig, ConfigOverrides},
    logging, AppResult,
};
use std::path::PathBuf;

/// medassist - questions and answers over your medical records
#[derive(Parser, Debug)]
#[command(name = "medassist")]
#[command(about = "Questions and answers over your medical records", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "MEDASSIST_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "MEDASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Answer generator (template, llm)
    #[arg(short, long, global = true, env = "MEDASSIST_GENERATOR")]
    generator: Option<String>,

    /// LLM provider for the llm generator
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model identifier for the llm generator
    #[arg(short, long, global = true, env = "MEDASSIST_MODEL")]
    model: Option<String>,

    /// Simulated answer latency in milliseconds
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask one question about a patient's records
    Ask(AskCommand),

    /// Interactive conversation about a patient's records
    Chat(ChatCommand),

    /// List the records visible to a patient
    Documents(DocumentsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Workspace and config file decide which YAML is read, so they apply at load time
    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(ConfigOverrides {
        generator: cli.generator,
        provider: cli.provider,
        model: cli.model,
        latency_ms: cli.latency_ms,
        log_level: cli.log_level,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Assistant settings: {:?}", config.assistant);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Documents(_) => "documents",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Documents(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
