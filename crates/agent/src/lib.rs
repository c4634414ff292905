//! Session orchestration for the product presenter agent
//!
//! This crate wires the analytics core together:
//! - **Session event router**: consumes runtime lifecycle events, drives
//!   topic/sentiment extraction, and owns the interaction record's lifecycle
//! - **Presenter agent**: per-session wiring of record, tools, and prompts
//! - **Session manager**: independent concurrent sessions
//! - **Telemetry**: tracing initialization

pub mod agent;
pub mod manager;
pub mod session;
pub mod telemetry;

pub use agent::PresenterAgent;
pub use manager::{Session, SessionManager};
pub use session::{coerce_transcript, SessionEvent, SessionRouter};
pub use telemetry::init_tracing;
