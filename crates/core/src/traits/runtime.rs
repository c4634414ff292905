//! Speech surface of the external voice-session runtime
//!
//! The runtime supplies speech recognition, reasoning, synthesis, and
//! turn-taking; this core only ever talks back through `speak`.

use async_trait::async_trait;

use crate::error::Result;

/// Outbound speech operations offered by the voice-session runtime
#[async_trait]
pub trait SpeechRuntime: Send + Sync {
    /// Speak `text` to the user.
    ///
    /// With `allow_interruptions` set to false the runtime guarantees the
    /// utterance finishes before new input is accepted. Tool handlers use
    /// that for acknowledgments so a barge-in cannot swallow them.
    async fn speak(&self, text: &str, allow_interruptions: bool) -> Result<()>;
}
