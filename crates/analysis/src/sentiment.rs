//! Sentiment classification for transcribed utterances
//!
//! Two fixed cue-word lists, matched case-insensitively as substrings. Each
//! utterance can flip the running sentiment instantly; there is no smoothing
//! or weighting. Positive cues are checked first and negative cues second,
//! so negative wins when both appear in the same utterance.

use presenter_core::Sentiment;

/// Cues that tentatively set sentiment to positive
const POSITIVE_CUES: [&str; 5] = ["love", "great", "awesome", "perfect", "thanks"];

/// Cues that overwrite sentiment to negative
const NEGATIVE_CUES: [&str; 5] = ["bad", "hate", "terrible", "angry", "refund"];

/// Stateless cue-list sentiment classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentClassifier;

impl SentimentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one utterance against the running sentiment.
    ///
    /// Returns `current` unchanged when no cue matches.
    pub fn classify(&self, text: &str, current: Sentiment) -> Sentiment {
        let lowered = text.to_lowercase();
        let mut sentiment = current;
        if POSITIVE_CUES.iter().any(|cue| lowered.contains(cue)) {
            sentiment = Sentiment::Positive;
        }
        if NEGATIVE_CUES.iter().any(|cue| lowered.contains(cue)) {
            sentiment = Sentiment::Negative;
        }
        sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_utterance() {
        let classifier = SentimentClassifier::new();
        assert_eq!(
            classifier.classify("this is terrible", Sentiment::Neutral),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_last_utterance_wins() {
        let classifier = SentimentClassifier::new();
        let after_bad = classifier.classify("this is terrible", Sentiment::Neutral);
        assert_eq!(after_bad, Sentiment::Negative);

        let after_good = classifier.classify("actually it's great", after_bad);
        assert_eq!(after_good, Sentiment::Positive);
    }

    #[test]
    fn test_negative_overrides_positive_in_one_utterance() {
        let classifier = SentimentClassifier::new();
        assert_eq!(
            classifier.classify("great but terrible", Sentiment::Neutral),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_no_cue_keeps_current() {
        let classifier = SentimentClassifier::new();
        assert_eq!(
            classifier.classify("what is the range?", Sentiment::Positive),
            Sentiment::Positive
        );
        assert_eq!(
            classifier.classify("", Sentiment::Negative),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = SentimentClassifier::new();
        assert_eq!(
            classifier.classify("GREAT, thanks!", Sentiment::Neutral),
            Sentiment::Positive
        );
    }
}
