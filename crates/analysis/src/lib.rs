//! Lexical analysis for the product presenter agent
//!
//! Pure, independently testable rule tables, decoupled from the session
//! event plumbing:
//! - **Topic extraction**: fixed ordered taxonomy of product topics
//! - **Sentiment classification**: cue-word lists with last-write-wins
//!   semantics

pub mod sentiment;
pub mod topics;

pub use sentiment::SentimentClassifier;
pub use topics::{TopicExtractor, MAX_TOPICS};
