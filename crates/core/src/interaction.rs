//! Per-session interaction record
//!
//! One record exists per voice session. The session event router owns its
//! lifecycle, but tool handlers invoked by the reasoning engine may mutate it
//! concurrently with an in-flight transcript handler. Every mutator is
//! therefore either append-only (`append_topic`), idempotent set-once
//! (`mark_conversion`, `mark_follow_up`), or a plain last-write-wins
//! overwrite (`set_sentiment`), so field-level locking is sufficient and no
//! outer lock is required.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Overall user sentiment derived from transcribed utterances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Mutable per-session aggregate of derived signals and outcomes
pub struct InteractionRecord {
    session_id: String,
    product_name: String,
    sentiment: RwLock<Sentiment>,
    topics: RwLock<Vec<String>>,
    conversion_triggered: AtomicBool,
    follow_up_needed: AtomicBool,
}

impl InteractionRecord {
    /// Create a fresh record at session start
    pub fn new(session_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            product_name: product_name.into(),
            sentiment: RwLock::new(Sentiment::Neutral),
            topics: RwLock::new(Vec::new()),
            conversion_triggered: AtomicBool::new(false),
            follow_up_needed: AtomicBool::new(false),
        }
    }

    /// Opaque session identifier, immutable after creation
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Product under discussion, immutable after creation
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Current running sentiment
    pub fn sentiment(&self) -> Sentiment {
        *self.sentiment.read()
    }

    /// Unconditional overwrite; the last processed utterance wins
    pub fn set_sentiment(&self, value: Sentiment) {
        *self.sentiment.write() = value;
    }

    /// Append a topic tag, preserving insertion order.
    ///
    /// Idempotent: a tag already present is a no-op. Returns whether the tag
    /// was newly appended.
    pub fn append_topic(&self, tag: &str) -> bool {
        let mut topics = self.topics.write();
        if topics.iter().any(|t| t == tag) {
            return false;
        }
        topics.push(tag.to_string());
        true
    }

    /// Topics recorded so far, in insertion order
    pub fn topics(&self) -> Vec<String> {
        self.topics.read().clone()
    }

    /// One-way flag: the user expressed buying intent.
    ///
    /// Returns whether this call flipped the flag.
    pub fn mark_conversion(&self) -> bool {
        !self.conversion_triggered.swap(true, Ordering::SeqCst)
    }

    pub fn conversion_triggered(&self) -> bool {
        self.conversion_triggered.load(Ordering::SeqCst)
    }

    /// One-way flag: the user asked for a follow-up (pricing email).
    ///
    /// Returns whether this call flipped the flag.
    pub fn mark_follow_up(&self) -> bool {
        !self.follow_up_needed.swap(true, Ordering::SeqCst)
    }

    pub fn follow_up_needed(&self) -> bool {
        self.follow_up_needed.load(Ordering::SeqCst)
    }

    /// Produce the canonical serialized shape of the record.
    ///
    /// Pure read; the router calls this exactly once at session close. The
    /// snapshot reflects whatever mutations had committed at that instant.
    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            session_id: self.session_id.clone(),
            product_name: self.product_name.clone(),
            user_sentiment: self.sentiment(),
            key_questions_asked: self.topics(),
            conversion_triggered: self.conversion_triggered(),
            follow_up_needed: self.follow_up_needed(),
        }
    }
}

/// Canonical field-ordered serialized form of an interaction record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionSnapshot {
    pub session_id: String,
    pub product_name: String,
    pub user_sentiment: Sentiment,
    pub key_questions_asked: Vec<String>,
    pub conversion_triggered: bool,
    pub follow_up_needed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = InteractionRecord::new("uuid-test", "E-Bike One");
        assert_eq!(record.sentiment(), Sentiment::Neutral);
        assert!(record.topics().is_empty());
        assert!(!record.conversion_triggered());
        assert!(!record.follow_up_needed());
    }

    #[test]
    fn test_append_topic_is_idempotent() {
        let record = InteractionRecord::new("uuid-test", "E-Bike One");
        assert!(record.append_topic("warranty"));
        assert!(!record.append_topic("warranty"));
        assert_eq!(record.topics(), vec!["warranty".to_string()]);
    }

    #[test]
    fn test_append_topic_preserves_order() {
        let record = InteractionRecord::new("uuid-test", "E-Bike One");
        record.append_topic("battery life");
        record.append_topic("warranty");
        record.append_topic("battery life");
        assert_eq!(record.topics(), vec!["battery life", "warranty"]);
    }

    #[test]
    fn test_flags_are_one_way() {
        let record = InteractionRecord::new("uuid-test", "E-Bike One");
        assert!(record.mark_conversion());
        assert!(!record.mark_conversion());
        assert!(record.conversion_triggered());

        assert!(record.mark_follow_up());
        assert!(!record.mark_follow_up());
        assert!(record.follow_up_needed());
    }

    #[test]
    fn test_sentiment_last_write_wins() {
        let record = InteractionRecord::new("uuid-test", "E-Bike One");
        record.set_sentiment(Sentiment::Negative);
        record.set_sentiment(Sentiment::Positive);
        assert_eq!(record.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_snapshot_shape() {
        let record = InteractionRecord::new("uuid-1", "E-Bike One");
        record.append_topic("price");
        record.set_sentiment(Sentiment::Positive);
        record.mark_conversion();

        let json = serde_json::to_value(record.snapshot()).unwrap();
        assert_eq!(json["session_id"], "uuid-1");
        assert_eq!(json["product_name"], "E-Bike One");
        assert_eq!(json["user_sentiment"], "positive");
        assert_eq!(json["key_questions_asked"], serde_json::json!(["price"]));
        assert_eq!(json["conversion_triggered"], true);
        assert_eq!(json["follow_up_needed"], false);
    }

    #[test]
    fn test_snapshot_empty_topics_serialize_as_empty_array() {
        let record = InteractionRecord::new("uuid-2", "E-Bike One");
        let json = serde_json::to_string(&record.snapshot()).unwrap();
        assert!(json.contains("\"key_questions_asked\":[]"));
    }

    #[test]
    fn test_concurrent_mutation() {
        use std::sync::Arc;

        let record = Arc::new(InteractionRecord::new("uuid-3", "E-Bike One"));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let r = Arc::clone(&record);
            handles.push(std::thread::spawn(move || {
                r.append_topic("warranty");
                r.mark_conversion();
                r.set_sentiment(Sentiment::Positive);
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(record.topics(), vec!["warranty"]);
        assert!(record.conversion_triggered());
        assert_eq!(record.sentiment(), Sentiment::Positive);
    }
}
