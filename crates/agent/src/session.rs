//! Session event router
//!
//! Subscribes to the external runtime's per-session lifecycle events and
//! drives the analytics core. Events for one session are processed in
//! arrival order, each handler running to completion before the next event
//! is accepted; different sessions share nothing.

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use presenter_analysis::{SentimentClassifier, TopicExtractor};
use presenter_core::InteractionRecord;
use presenter_persistence::DurableSink;

/// Lifecycle events delivered by the voice-session runtime
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A user utterance was transcribed. Repeatable; the payload is
    /// nominally a JSON string but is coerced when it is not.
    Transcribed(Value),
    /// The session ended. Terminal; fires at most once.
    Closed,
}

/// Coerce a transcript payload to text.
///
/// A JSON string is used as-is; null becomes empty; anything else is
/// rendered through its JSON representation. Never fails, never propagates.
pub fn coerce_transcript(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Per-session event router owning the interaction record's lifecycle
pub struct SessionRouter {
    record: Arc<InteractionRecord>,
    topics: TopicExtractor,
    sentiment: SentimentClassifier,
    interaction_sink: Arc<dyn DurableSink>,
    closed: AtomicBool,
}

impl SessionRouter {
    pub fn new(record: Arc<InteractionRecord>, interaction_sink: Arc<dyn DurableSink>) -> Self {
        Self {
            record,
            topics: TopicExtractor::new(),
            sentiment: SentimentClassifier::new(),
            interaction_sink,
            closed: AtomicBool::new(false),
        }
    }

    /// The record this router owns
    pub fn record(&self) -> &Arc<InteractionRecord> {
        &self.record
    }

    /// Process one transcribed utterance
    pub fn handle_transcribed(&self, payload: &Value) {
        let text = coerce_transcript(payload);

        for tag in self.topics.extract(&text) {
            if self.record.append_topic(tag) {
                tracing::debug!(
                    session_id = self.record.session_id(),
                    topic = tag,
                    "Topic recorded"
                );
            }
        }

        let updated = self.sentiment.classify(&text, self.record.sentiment());
        self.record.set_sentiment(updated);
    }

    /// Finalize the session: serialize the record once and append it to the
    /// interaction-log sink.
    ///
    /// Returns whether this call performed the finalization. Safe against a
    /// duplicate close signal; the snapshot reflects whatever mutations had
    /// committed at this instant, so a tool write still in flight cannot
    /// corrupt it.
    pub async fn handle_closed(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                session_id = self.record.session_id(),
                "Duplicate close ignored; interaction log already persisted"
            );
            return false;
        }

        let snapshot = self.record.snapshot();
        match serde_json::to_value(&snapshot) {
            Ok(value) => {
                if let Err(e) = self.interaction_sink.append(&value).await {
                    tracing::error!(
                        session_id = self.record.session_id(),
                        error = %e,
                        "Interaction log not persisted"
                    );
                } else {
                    tracing::info!(
                        session_id = self.record.session_id(),
                        sentiment = snapshot.user_sentiment.as_str(),
                        topics = snapshot.key_questions_asked.len(),
                        conversion = snapshot.conversion_triggered,
                        "Session closed; interaction log persisted"
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    session_id = self.record.session_id(),
                    error = %e,
                    "Interaction record failed to serialize"
                );
            }
        }

        true
    }

    /// Drive this session to completion.
    ///
    /// Consumes events in arrival order, one at a time. The runtime dropping
    /// its sender without an explicit `Closed` still counts as a close
    /// signal; finalization happens exactly once either way.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Transcribed(payload) => self.handle_transcribed(&payload),
                SessionEvent::Closed => break,
            }
        }

        self.handle_closed().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presenter_core::Sentiment;
    use presenter_persistence::MemorySink;
    use serde_json::json;

    fn router_with_sink() -> (Arc<SessionRouter>, Arc<MemorySink>) {
        let record = Arc::new(InteractionRecord::new("uuid-router", "Volt X2"));
        let sink = Arc::new(MemorySink::new("interactions"));
        let router = Arc::new(SessionRouter::new(record, sink.clone()));
        (router, sink)
    }

    #[test]
    fn test_coerce_transcript() {
        assert_eq!(coerce_transcript(&json!("hello")), "hello");
        assert_eq!(coerce_transcript(&json!(null)), "");
        assert_eq!(coerce_transcript(&json!(42)), "42");
        assert_eq!(coerce_transcript(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_transcribed_updates_topics_and_sentiment() {
        let (router, _sink) = router_with_sink();

        router.handle_transcribed(&json!("What's the battery range and warranty?"));
        router.handle_transcribed(&json!("the shipping cost seems bad"));

        let record = router.record();
        assert_eq!(
            record.topics(),
            vec!["battery life", "warranty", "shipping", "price"]
        );
        assert_eq!(record.sentiment(), Sentiment::Negative);
    }

    #[test]
    fn test_repeated_topics_not_duplicated() {
        let (router, _sink) = router_with_sink();
        router.handle_transcribed(&json!("how long is the warranty?"));
        router.handle_transcribed(&json!("and the warranty again?"));
        assert_eq!(router.record().topics(), vec!["warranty"]);
    }

    #[test]
    fn test_malformed_payload_is_coerced_not_dropped() {
        let (router, _sink) = router_with_sink();
        // A non-text payload that happens to mention a topic still counts
        router.handle_transcribed(&json!({"transcript": "warranty"}));
        assert_eq!(router.record().topics(), vec!["warranty"]);
    }

    #[tokio::test]
    async fn test_close_serializes_exactly_once() {
        let (router, sink) = router_with_sink();
        router.handle_transcribed(&json!("I love it, what's the price?"));

        assert!(router.handle_closed().await);
        assert!(!router.handle_closed().await);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["session_id"], "uuid-router");
        assert_eq!(records[0]["user_sentiment"], "positive");
        assert_eq!(records[0]["key_questions_asked"], json!(["price"]));
    }

    #[tokio::test]
    async fn test_run_finalizes_on_channel_close_without_closed_event() {
        let (router, sink) = router_with_sink();
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(router.clone().run(rx));
        tx.send(SessionEvent::Transcribed(json!("great motor")))
            .await
            .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0]["user_sentiment"], "positive");
    }

    #[tokio::test]
    async fn test_run_processes_in_arrival_order() {
        let (router, sink) = router_with_sink();
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(router.clone().run(rx));
        tx.send(SessionEvent::Transcribed(json!("this is terrible")))
            .await
            .unwrap();
        tx.send(SessionEvent::Transcribed(json!("actually it's great")))
            .await
            .unwrap();
        tx.send(SessionEvent::Closed).await.unwrap();
        handle.await.unwrap();

        // Last utterance wins
        assert_eq!(sink.records()[0]["user_sentiment"], "positive");
    }
}
