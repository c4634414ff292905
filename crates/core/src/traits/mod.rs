//! Core trait definitions
//!
//! Seams between this crate and the external collaborators:
//! - `Tool`: operations the reasoning engine can discover and invoke
//! - `SpeechRuntime`: the outbound speech surface of the voice runtime

pub mod runtime;
pub mod tool;

pub use runtime::SpeechRuntime;
pub use tool::{
    validate_property, ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError,
    ToolOutput, ToolSchema,
};
