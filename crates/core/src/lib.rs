//! Core traits and types for the product presenter agent
//!
//! This crate provides foundational types used across all other crates:
//! - The per-session interaction record and its mutation contract
//! - The `Tool` trait family for reasoning-engine-invokable operations
//! - The `SpeechRuntime` trait for the external voice-session runtime
//! - Error types

pub mod error;
pub mod interaction;
pub mod traits;

pub use error::{Error, Result};
pub use interaction::{InteractionRecord, InteractionSnapshot, Sentiment};
pub use traits::{
    ContentBlock, ErrorCode, InputSchema, PropertySchema, SpeechRuntime, Tool, ToolError,
    ToolOutput, ToolSchema,
};
