//! Per-session agent wiring
//!
//! A [`PresenterAgent`] is created once per voice session. It resolves the
//! fact sheet into the reasoning engine's instructions, generates the session
//! identity, builds the interaction record, registers the tool handlers, and
//! owns the event router that finalizes everything at close.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use presenter_config::{AgentSettings, FactSheet};
use presenter_core::{InteractionRecord, SpeechRuntime};
use presenter_persistence::AnalyticsSinks;
use presenter_tools::{SendPricingEmailTool, SignUpTool, ToolRegistry};

use crate::session::{SessionEvent, SessionRouter};

/// Buffer for the per-session event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// One voice session's analytics core
pub struct PresenterAgent {
    session_id: String,
    record: Arc<InteractionRecord>,
    registry: Arc<ToolRegistry>,
    router: Arc<SessionRouter>,
    instructions: String,
    greeting: String,
}

impl PresenterAgent {
    /// Wire up a session from the resolved fact sheet and shared sinks.
    ///
    /// The session id is freshly generated; the tool handlers and the router
    /// share one interaction record.
    pub fn new(
        facts: &FactSheet,
        agent: &AgentSettings,
        sinks: &AnalyticsSinks,
        runtime: Arc<dyn SpeechRuntime>,
    ) -> Self {
        let session_id = format!("uuid-{}", Uuid::new_v4());
        let product_name = facts.product_name();
        let record = Arc::new(InteractionRecord::new(&session_id, &product_name));

        let mut registry = ToolRegistry::new();
        registry.register(SignUpTool::new(
            record.clone(),
            sinks.signups.clone(),
            runtime.clone(),
        ));
        registry.register(SendPricingEmailTool::new(
            record.clone(),
            sinks.pricing_requests.clone(),
            runtime,
        ));

        let router = Arc::new(SessionRouter::new(
            record.clone(),
            sinks.interactions.clone(),
        ));

        let instructions = build_instructions(&agent.name, &product_name, &facts.to_bullets());
        let greeting = format!(
            "Hi! I'm {}, your guide for the {}. What can I help you discover today?",
            agent.name, product_name
        );

        tracing::info!(session_id = %session_id, product = %product_name, "Session created");

        Self {
            session_id,
            record,
            registry: Arc::new(registry),
            router,
            instructions,
            greeting,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn record(&self) -> &Arc<InteractionRecord> {
        &self.record
    }

    /// Registry the reasoning engine invokes tools through
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Instructions handed to the reasoning engine at session start
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Opening line, spoken uninterruptibly before the first user turn
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Start consuming lifecycle events.
    ///
    /// Returns the sender the runtime feeds and the handle that resolves
    /// once the session is finalized. Dropping the sender is equivalent to
    /// sending [`SessionEvent::Closed`].
    pub fn start(&self) -> (mpsc::Sender<SessionEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = tokio::spawn(self.router.clone().run(rx));
        (tx, handle)
    }
}

/// Render the reasoning engine's instruction prompt.
///
/// Grounds the engine in the fact sheet alone and names the two tools it may
/// call.
fn build_instructions(agent_name: &str, product_name: &str, fact_bullets: &str) -> String {
    format!(
        "\
You are {agent_name}, a professional product expert in a virtual showroom.

Voice & tone:
- Warm, upbeat, confident. Sound natural (short sentences, light contractions).
- Keep replies to 1-3 concise sentences, then end with a short follow-up question or offer (e.g., \"Want a quick take on range or warranty?\").
- Use quick bullets only when listing specs.

Rules:
- The system already greets at the start of the call. Do NOT repeat the full greeting unless asked.
- You are ONLY trained on the Product Fact Sheet below. Do not guess or invent details.
- Prioritize the user's ask first; then offer one relevant next step (range, charging, motor, shipping, or warranty).
- If the user asks something not in the fact sheet, say:
  \"I'm specifically trained on our {product_name} features. I'm not sure about that, but I can tell you about our motor, battery, shipping, or warranty!\"
- If the user hesitates, propose a quick 20-second highlights tour.
- If the user expresses intent to buy/sign up/checkout, call the tool `sign_up`.
- If the user asks for pricing info to be emailed, call the tool `send_pricing_email`.
- Match numeric wording exactly from the fact sheet. If unsure, say you don't have that detail.
- Adjust tone to sentiment: reassure if frustrated; celebrate if excited.

Product Fact Sheet:
{fact_bullets}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use presenter_core::Result;
    use serde_json::json;

    struct NullRuntime;

    #[async_trait]
    impl SpeechRuntime for NullRuntime {
        async fn speak(&self, _text: &str, _allow_interruptions: bool) -> Result<()> {
            Ok(())
        }
    }

    fn demo_agent() -> PresenterAgent {
        let facts = FactSheet::from_value(json!({
            "product_name": "Volt X2",
            "battery": "80 km range",
        }))
        .unwrap();
        let (sinks, _handles) = AnalyticsSinks::in_memory();
        PresenterAgent::new(
            &facts,
            &AgentSettings::default(),
            &sinks,
            Arc::new(NullRuntime),
        )
    }

    #[test]
    fn test_session_id_format() {
        let agent = demo_agent();
        assert!(agent.session_id().starts_with("uuid-"));
        // "uuid-" prefix plus a hyphenated v4 uuid
        assert_eq!(agent.session_id().len(), 5 + 36);
    }

    #[test]
    fn test_each_agent_gets_fresh_identity() {
        assert_ne!(demo_agent().session_id(), demo_agent().session_id());
    }

    #[test]
    fn test_both_tools_registered() {
        let agent = demo_agent();
        assert!(agent.registry().has("sign_up"));
        assert!(agent.registry().has("send_pricing_email"));
        assert_eq!(agent.registry().len(), 2);
    }

    #[test]
    fn test_instructions_embed_fact_sheet() {
        let agent = demo_agent();
        assert!(agent.instructions().contains("You are Alex"));
        assert!(agent.instructions().contains("- battery: 80 km range"));
        assert!(agent.instructions().contains("`sign_up`"));
        assert!(agent.instructions().contains("`send_pricing_email`"));
    }

    #[test]
    fn test_greeting_names_product() {
        let agent = demo_agent();
        assert_eq!(
            agent.greeting(),
            "Hi! I'm Alex, your guide for the Volt X2. What can I help you discover today?"
        );
    }

    #[tokio::test]
    async fn test_start_finalizes_on_close() {
        let facts = FactSheet::from_value(json!({"product_name": "Volt X2"})).unwrap();
        let (sinks, handles) = AnalyticsSinks::in_memory();
        let agent = PresenterAgent::new(
            &facts,
            &AgentSettings::default(),
            &sinks,
            Arc::new(NullRuntime),
        );

        let (tx, handle) = agent.start();
        tx.send(SessionEvent::Transcribed(json!("does it have gps tracking?")))
            .await
            .unwrap();
        tx.send(SessionEvent::Closed).await.unwrap();
        handle.await.unwrap();

        let records = handles.interactions.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["session_id"], agent.session_id());
        assert_eq!(records[0]["key_questions_asked"], json!(["gps"]));
    }
}
