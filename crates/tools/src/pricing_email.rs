//! Pricing email tool
//!
//! Invoked when the user asks for pricing information by email. Appends a
//! pricing request record, prompts aloud for the best address, and marks the
//! follow-up flag.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use presenter_core::{
    InputSchema, InteractionRecord, PropertySchema, SpeechRuntime, Tool, ToolError, ToolOutput,
    ToolSchema,
};
use presenter_persistence::DurableSink;

/// Spoken prompt, uninterruptible so the user always hears it
const EMAIL_PROMPT: &str = "I can email you pricing details. What's the best email to use?";

/// Pricing email tool
pub struct SendPricingEmailTool {
    record: Arc<InteractionRecord>,
    sink: Arc<dyn DurableSink>,
    runtime: Arc<dyn SpeechRuntime>,
}

impl SendPricingEmailTool {
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
impl Tool for SendPricingEmailTool {
    fn name(&self) -> &str {
        "send_pricing_email"
    }

    fn description(&self) -> &str {
        "Send the pricing sheet to the user via email."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "email",
                    PropertySchema::string("User's email address, if they shared one"),
                    false,
                )
                .property(
                    "notes",
                    PropertySchema::string("Context from the conversation to include"),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let email = input.get("email").and_then(Value::as_str);
        let notes = input.get("notes").and_then(Value::as_str);

        let payload = json!({
            "session_id": self.record.session_id(),
            "product_name": self.record.product_name(),
            "email": email,
            "notes": notes,
        });

        // At-least-once, best-effort; see sign_up
        if let Err(e) = self.sink.append(&payload).await {
            tracing::warn!(
                sink = self.sink.name(),
                session_id = self.record.session_id(),
                error = %e,
                "Pricing request record not persisted"
            );
        }

        if let Err(e) = self.runtime.speak(EMAIL_PROMPT, false).await {
            tracing::warn!(
                session_id = self.record.session_id(),
                error = %e,
                "Pricing email prompt was not spoken"
            );
        }

        self.record.mark_follow_up();

        tracing::info!(
            session_id = self.record.session_id(),
            email = email.unwrap_or("<none>"),
            "Follow-up requested"
        );

        Ok(ToolOutput::json(json!({ "ok": true, "email": email })))
    }

    fn timeout_secs(&self) -> u64 {
        10
    }
}
