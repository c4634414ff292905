//! Configuration for the product presenter agent
//!
//! Two concerns live here:
//! - **Settings**: file + environment layered runtime configuration
//! - **Fact sheet**: the single external data input, resolved once at
//!   session start and read-only thereafter

pub mod error;
pub mod fact_sheet;
pub mod settings;

pub use error::ConfigError;
pub use fact_sheet::FactSheet;
pub use settings::{AgentSettings, Settings, SinkConfig};
