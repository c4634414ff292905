//! Sign-up tool
//!
//! Invoked when the user expresses intent to buy, sign up, or check out.
//! Appends a signup record, marks the conversion flag, and confirms aloud.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use presenter_core::{
    InputSchema, InteractionRecord, PropertySchema, SpeechRuntime, Tool, ToolError, ToolOutput,
    ToolSchema,
};
use presenter_persistence::DurableSink;

/// Spoken confirmation, uninterruptible so the user always hears it
const CONFIRMATION: &str = "Perfect — I can help with that. If you share your email, \
     I'll log your interest and send next steps.";

/// Sign-up tool
pub struct SignUpTool {
    record: Arc<InteractionRecord>,
    sink: Arc<dyn DurableSink>,
    runtime: Arc<dyn SpeechRuntime>,
}

impl SignUpTool {
    pub fn new(
        record: Arc<InteractionRecord>,
        sink: Arc<dyn DurableSink>,
        runtime: Arc<dyn SpeechRuntime>,
    ) -> Self {
        Self {
            record,
            sink,
            runtime,
        }
    }
}

#[async_trait]
impl Tool for SignUpTool {
    fn name(&self) -> &str {
        "sign_up"
    }

    fn description(&self) -> &str {
        "Log the user's interest to buy/sign up for the product."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "email",
                PropertySchema::string("User's email address, if they shared one"),
                false,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let email = input.get("email").and_then(Value::as_str);

        let payload = json!({
            "session_id": self.record.session_id(),
            "product_name": self.record.product_name(),
            "email": email,
        });

        // At-least-once, best-effort: a lost record is logged, never fatal,
        // and a retried call may legitimately produce a duplicate.
        if let Err(e) = self.sink.append(&payload).await {
            tracing::warn!(
                sink = self.sink.name(),
                session_id = self.record.session_id(),
                error = %e,
                "Signup record not persisted"
            );
        }

        // Mutation only after the write attempt; idempotent either way
        self.record.mark_conversion();

        // The user must not be left hanging even when persistence failed
        if let Err(e) = self.runtime.speak(CONFIRMATION, false).await {
            tracing::warn!(
                session_id = self.record.session_id(),
                error = %e,
                "Signup confirmation was not spoken"
            );
        }

        tracing::info!(
            session_id = self.record.session_id(),
            email = email.unwrap_or("<none>"),
            "Conversion triggered"
        );

        Ok(ToolOutput::json(json!({ "ok": true })))
    }

    fn timeout_secs(&self) -> u64 {
        10
    }
}
