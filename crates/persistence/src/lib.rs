//! Durable persistence layer for the presenter agent
//!
//! Provides append-only persisted record streams for:
//! - Interaction logs (one record per closed session)
//! - Signup requests
//! - Pricing email requests

pub mod error;
pub mod sink;

pub use error::PersistenceError;
pub use sink::{DurableSink, JsonlSink, MemorySink};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// File name for the interaction log stream
pub const INTERACTION_LOG_FILE: &str = "interaction_logs.jsonl";
/// File name for the signup stream
pub const SIGNUP_FILE: &str = "signups.jsonl";
/// File name for the pricing email request stream
pub const PRICING_EMAIL_FILE: &str = "pricing_emails.jsonl";

/// The three analytics record streams of a deployment.
///
/// Shared across sessions; each stream is safe for concurrent appenders.
#[derive(Clone)]
pub struct AnalyticsSinks {
    pub interactions: Arc<dyn DurableSink>,
    pub signups: Arc<dyn DurableSink>,
    pub pricing_requests: Arc<dyn DurableSink>,
}

impl AnalyticsSinks {
    /// JSONL-file-backed sinks under `dir`, created on first write
    pub fn jsonl(dir: impl AsRef<Path>, write_timeout: Duration) -> Self {
        let dir = dir.as_ref();
        Self {
            interactions: Arc::new(JsonlSink::new(
                "interactions",
                dir.join(INTERACTION_LOG_FILE),
                write_timeout,
            )),
            signups: Arc::new(JsonlSink::new("signups", dir.join(SIGNUP_FILE), write_timeout)),
            pricing_requests: Arc::new(JsonlSink::new(
                "pricing_requests",
                dir.join(PRICING_EMAIL_FILE),
                write_timeout,
            )),
        }
    }

    /// In-memory sinks for tests
    pub fn in_memory() -> (Self, InMemoryHandles) {
        let interactions = Arc::new(MemorySink::new("interactions"));
        let signups = Arc::new(MemorySink::new("signups"));
        let pricing_requests = Arc::new(MemorySink::new("pricing_requests"));

        let handles = InMemoryHandles {
            interactions: interactions.clone(),
            signups: signups.clone(),
            pricing_requests: pricing_requests.clone(),
        };

        (
            Self {
                interactions,
                signups,
                pricing_requests,
            },
            handles,
        )
    }
}

/// Concrete handles to in-memory sinks, for asserting on appended records
#[derive(Clone)]
pub struct InMemoryHandles {
    pub interactions: Arc<MemorySink>,
    pub signups: Arc<MemorySink>,
    pub pricing_requests: Arc<MemorySink>,
}
