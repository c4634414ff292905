//! Error types for the presenter agent

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the presenter agent
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (fact sheet, settings) - fatal at session start
    #[error("Configuration error: {0}")]
    Config(String),

    // Durable sink errors - recoverable, records are analytics data
    #[error("Sink error: {0}")]
    Sink(String),

    // Voice runtime errors (speak failures)
    #[error("Runtime error: {0}")]
    Runtime(String),

    // Session lifecycle errors
    #[error("Session error: {0}")]
    Session(String),

    // Tool errors
    #[error("Tool error: {0}")]
    Tool(#[from] crate::traits::ToolError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a runtime error
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        Error::Runtime(msg.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
