//! Topic extraction from transcribed utterances
//!
//! Maintains a fixed, ordered taxonomy of topic tags, each with a
//! case-insensitive lexical pattern. Evaluation happens in taxonomy order,
//! so the output order reflects the taxonomy, not the input; duplicates are
//! impossible by construction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of topic tags reported per utterance
pub const MAX_TOPICS: usize = 5;

/// Ordered (tag, pattern) taxonomy.
///
/// Matching is substring-based with a few word boundaries where short tokens
/// would otherwise over-match ("gps", "km").
static TOPIC_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("gps", r"\bgps\b|tracking|anti-theft"),
        ("battery life", r"battery|range|km\b|charge"),
        ("charging", r"charge|charging|charger"),
        ("motor", r"motor|torque|watt"),
        ("warranty", r"warranty|guarantee"),
        ("shipping", r"shipping|delivery|ship"),
        ("returns", r"return|refund"),
        ("price", r"price|cost|buy|purchase|sign up|checkout"),
    ]
    .into_iter()
    .map(|(tag, pattern)| {
        let re = Regex::new(pattern).expect("topic pattern must compile");
        (tag, re)
    })
    .collect()
});

/// Deterministic, stateless topic extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicExtractor;

impl TopicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract topic tags from an utterance.
    ///
    /// Returns at most [`MAX_TOPICS`] tags in taxonomy order. Empty or
    /// non-matching input yields an empty vec. Any text-like input is
    /// accepted; there is no failure mode.
    pub fn extract(&self, text: &str) -> Vec<&'static str> {
        let lowered = text.to_lowercase();
        TOPIC_RULES
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&lowered))
            .map(|(tag, _)| *tag)
            .take(MAX_TOPICS)
            .collect()
    }
}
