//! Offline keyword sentiment analyzer.
//!
//! Used in place of the remote service when it cannot be reached. Counts how
//! many words from two fixed lists appear in the text as plain substrings, so
//! "goodbye" counts as "good". Deterministic and free of I/O.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::sentiment::{SentimentLabel, SentimentReport};

pub const MOCK_MESSAGE: &str = "This is a mock response for testing purposes";

const WEIGHT_PER_WORD: f64 = 0.2;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "best",
        "happy",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "bad", "terrible", "awful", "hate", "worst", "horrible", "disappointing", "poor",
    ]
    .into_iter()
    .collect()
});

fn count_matches(text: &str, words: &HashSet<&'static str>) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}

/// Estimates sentiment from keyword counts.
///
/// Each list word is counted at most once. The side with more hits wins with
/// a magnitude of `0.2` per hit, capped at `1.0`; a draw (including no hits)
/// is neutral.
pub fn mock_analyze(text: &str) -> SentimentReport {
    let lowercase_text = text.to_lowercase();
    let positive_count = count_matches(&lowercase_text, &POSITIVE_WORDS);
    let negative_count = count_matches(&lowercase_text, &NEGATIVE_WORDS);

    let (label, score) = if positive_count > negative_count {
        (
            SentimentLabel::Positive,
            (positive_count as f64 * WEIGHT_PER_WORD).min(1.0),
        )
    } else if negative_count > positive_count {
        (
            SentimentLabel::Negative,
            -(negative_count as f64 * WEIGHT_PER_WORD).min(1.0),
        )
    } else {
        (SentimentLabel::Neutral, 0.0)
    };

    tracing::debug!(
        positive_count,
        negative_count,
        label = label.as_str(),
        "Keyword sentiment estimate"
    );

    SentimentReport {
        mock: true,
        message: Some(MOCK_MESSAGE.to_string()),
        ..SentimentReport::new(label, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_positive_sentiment() {
        let result = mock_analyze("I love this product, it's the best!");
        assert_eq!(result.label(), SentimentLabel::Positive);
        assert!(approx(result.score(), 0.4));
        assert!(result.mock);
    }

    #[test]
    fn test_negative_sentiment() {
        let result = mock_analyze("This is terrible and awful.");
        assert_eq!(result.label(), SentimentLabel::Negative);
        assert!(approx(result.score(), -0.4));
    }

    #[test]
    fn test_neutral_sentiment() {
        let result = mock_analyze("The sky is blue.");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert_eq!(result.score(), 0.0);
    }

    #[test]
    fn test_tie_is_neutral() {
        let result = mock_analyze("Good start, bad ending.");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert_eq!(result.score(), 0.0);
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        // "GOODBYE" contains "good", "UNHAPPY" contains "happy"
        let result = mock_analyze("GOODBYE, UNHAPPY days");
        assert_eq!(result.label(), SentimentLabel::Positive);
        assert!(approx(result.score(), 0.4));
    }

    #[test]
    fn test_score_is_capped() {
        let text = "good great excellent amazing wonderful fantastic love best happy";
        let result = mock_analyze(text);
        assert_eq!(result.score(), 1.0);

        let text = "bad terrible awful hate worst horrible disappointing poor";
        let result = mock_analyze(text);
        assert_eq!(result.score(), -1.0);
    }

    #[test]
    fn test_repeated_word_counts_once() {
        let result = mock_analyze("bad bad bad bad");
        assert!(approx(result.score(), -0.2));
    }

    #[test]
    fn test_deterministic_and_marked() {
        let text = "This product is amazing and wonderful!";
        let a = mock_analyze(text);
        let b = mock_analyze(text);
        assert_eq!(a, b);
        assert_eq!(a.message.as_deref(), Some(MOCK_MESSAGE));

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["mock"], serde_json::json!(true));
        assert_eq!(json["documentSentiment"]["label"], "positive");
    }

    #[test]
    fn test_empty_text() {
        let result = mock_analyze("");
        assert_eq!(result.label(), SentimentLabel::Neutral);
    }
}
