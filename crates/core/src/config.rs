//! Configuration management for medassist.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - Config file (`.medassist/config.yaml` in the workspace, or an explicit path)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Answer generators the assistant knows how to build.
pub const KNOWN_GENERATORS: [&str; 2] = ["template", "llm"];

/// LLM providers with a client implementation.
pub const KNOWN_PROVIDERS: [&str; 1] = ["ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root (holds `.medassist/`)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Records file backing the document provider
    pub records: Option<PathBuf>,

    /// Patient identity whose documents form the corpus
    pub patient: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Answering engine settings
    pub assistant: AssistantConfig,
}

/// Settings for the answering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    /// Answer generator: "template" (rule table) or "llm"
    pub generator: String,

    /// LLM provider used by the "llm" generator
    pub provider: String,

    /// Model identifier for the LLM provider
    pub model: String,

    /// Custom provider endpoint
    pub endpoint: Option<String>,

    /// Simulated response latency in milliseconds (0 disables it)
    pub latency_ms: u64,

    /// Number of prior transcript messages forwarded to the LLM
    pub history_messages: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            generator: "template".to_string(),
            provider: "ollama".to_string(),
            model: "llama3.2".to_string(),
            endpoint: None,
            latency_ms: 0,
            history_messages: 6,
        }
    }
}

/// Command-line values layered over the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub generator: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub latency_ms: Option<u64>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    assistant: Option<AssistantConfig>,
    records: Option<RecordsSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordsSection {
    path: Option<String>,
    patient: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            records: None,
            patient: None,
            log_level: None,
            verbose: false,
            no_color: false,
            assistant: AssistantConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration for a workspace from defaults, the config file and
    /// environment variables.
    ///
    /// `None` falls back to the current directory and
    /// `<workspace>/.medassist/config.yaml` respectively.
    ///
    /// Environment variables:
    /// - `MEDASSIST_RECORDS`: Records file for the document provider
    /// - `MEDASSIST_PATIENT`: Patient identity
    /// - `MEDASSIST_GENERATOR`: Answer generator
    /// - `MEDASSIST_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }
        config.config_file = config_file;

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.config_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(records) = std::env::var("MEDASSIST_RECORDS") {
            config.records = Some(PathBuf::from(records));
        }

        if let Ok(patient) = std::env::var("MEDASSIST_PATIENT") {
            config.patient = Some(patient);
        }

        if let Ok(generator) = std::env::var("MEDASSIST_GENERATOR") {
            config.assistant.generator = generator;
        }

        if let Ok(model) = std::env::var("MEDASSIST_MODEL") {
            config.assistant.model = model;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into a copy of this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merging config file {:?}", path);

        let mut result = self.clone();

        if let Some(assistant) = config_file.assistant {
            result.assistant = assistant;
        }

        if let Some(records) = config_file.records {
            if let Some(records_path) = records.path {
                // Relative records paths resolve against the workspace
                result.records = Some(result.workspace.join(records_path));
            }
            if records.patient.is_some() {
                result.patient = records.patient;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides; flags take precedence over file and environment.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(generator) = overrides.generator {
            self.assistant.generator = generator;
        }

        if let Some(provider) = overrides.provider {
            self.assistant.provider = provider;
        }

        if let Some(model) = overrides.model {
            self.assistant.model = model;
        }

        if let Some(latency_ms) = overrides.latency_ms {
            self.assistant.latency_ms = latency_ms;
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = Some(log_level);
        }

        if overrides.verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if overrides.no_color {
            self.no_color = true;
        }

        self
    }

    /// Path to the `.medassist` directory.
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(".medassist")
    }

    /// Validate the assistant settings.
    pub fn validate(&self) -> AppResult<()> {
        let assistant = &self.assistant;

        if !KNOWN_GENERATORS.contains(&assistant.generator.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown generator: {}. Supported: {}",
                assistant.generator,
                KNOWN_GENERATORS.join(", ")
            )));
        }

        let provider_known = KNOWN_PROVIDERS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&assistant.provider));
        if assistant.generator == "llm" && !provider_known {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                assistant.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        Ok(())
    }
}
