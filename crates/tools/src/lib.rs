//! Tool invocation handlers for the presenter agent
//!
//! The external reasoning engine discovers these by name/description/schema
//! and invokes them when user intent warrants action. Each handler performs
//! an append-only durable write, mutates the shared interaction record, and
//! speaks an uninterruptible acknowledgment through the voice runtime.

pub mod pricing_email;
pub mod registry;
pub mod sign_up;

pub use pricing_email::SendPricingEmailTool;
pub use registry::{ToolExecutor, ToolRegistry};
pub use sign_up::SignUpTool;
