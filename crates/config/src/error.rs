//! Configuration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Fact sheet missing or unreadable. Fatal: aborts session start.
    #[error("Fact sheet unreadable at {path}: {message}")]
    FactSheet { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Config load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn fact_sheet(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FactSheet {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
