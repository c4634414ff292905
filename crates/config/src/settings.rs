//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the product fact sheet (JSON)
    #[serde(default = "default_fact_sheet_path")]
    pub fact_sheet_path: String,

    /// Durable sink configuration
    #[serde(default)]
    pub sink: SinkConfig,

    /// Agent persona configuration
    #[serde(default)]
    pub agent: AgentSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fact_sheet_path: default_fact_sheet_path(),
            sink: SinkConfig::default(),
            agent: AgentSettings::default(),
        }
    }
}

/// Durable sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Directory holding the append-only JSONL record streams
    #[serde(default = "default_sink_dir")]
    pub dir: String,

    /// Bounded timeout for a single durable write, in milliseconds
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            dir: default_sink_dir(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

/// Agent persona configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Presenter name used in the greeting and instructions
    #[serde(default = "default_agent_name")]
    pub name: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
        }
    }
}

fn default_fact_sheet_path() -> String {
    std::env::var("PRODUCT_FACT_SHEET").unwrap_or_else(|_| "./product_fact_sheet.json".to_string())
}

fn default_sink_dir() -> String {
    "logs".to_string()
}

fn default_write_timeout_ms() -> u64 {
    2_000
}

fn default_agent_name() -> String {
    "Alex".to_string()
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an optional config file plus environment overrides.
    ///
    /// Priority: `PRESENTER_`-prefixed env vars > config file > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("PRESENTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            fact_sheet_path = %settings.fact_sheet_path,
            sink_dir = %settings.sink.dir,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Load the product fact sheet from the configured path.
    ///
    /// This is the bridge between `fact_sheet_path` and [`FactSheet`]; the
    /// embedder calls it once at session start.
    pub fn load_fact_sheet(&self) -> Result<crate::FactSheet, ConfigError> {
        crate::FactSheet::load(&self.fact_sheet_path)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fact_sheet_path.is_empty() {
            return Err(ConfigError::invalid_value(
                "fact_sheet_path",
                "must not be empty",
            ));
        }

        if self.sink.dir.is_empty() {
            return Err(ConfigError::invalid_value("sink.dir", "must not be empty"));
        }

        if self.sink.write_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "sink.write_timeout_ms",
                "must be greater than zero",
            ));
        }

        if self.sink.write_timeout_ms > 60_000 {
            return Err(ConfigError::invalid_value(
                "sink.write_timeout_ms",
                format!("too high (maximum 60000ms), got {}", self.sink.write_timeout_ms),
            ));
        }

        Ok(())
    }
}
