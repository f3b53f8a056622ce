//! Sentiment shape and the emotion -> sentiment bridge.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::emotion::EmotionVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Reads a label as the upstreams spell it: `positive`, `Positive`, or
    /// the NLP runtime's `SENT_POSITIVE`. Anything unrecognised is neutral.
    pub fn from_upstream(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.strip_prefix("sent_").unwrap_or(&label) {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sentiment label with a signed score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    #[schema(example = 0.4)]
    pub score: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
        }
    }
}

/// Normalized sentiment document: `{"documentSentiment": {"label", "score"}}`.
///
/// Results from the offline keyword analyzer also carry `"mock": true` and a
/// short message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentimentReport {
    #[serde(rename = "documentSentiment")]
    pub document_sentiment: SentimentResult,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SentimentReport {
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self {
            document_sentiment: SentimentResult { label, score },
            mock: false,
            message: None,
        }
    }

    pub fn label(&self) -> SentimentLabel {
        self.document_sentiment.label
    }

    pub fn score(&self) -> f64 {
        self.document_sentiment.score
    }
}

/// Converts an emotion vector to a sentiment for callers that only speak the
/// sentiment format.
///
/// Joy dominant is positive with the joy score. Any other dominant emotion is
/// negative with that emotion's score negated. No dominant emotion is neutral.
pub fn to_sentiment(vector: &EmotionVector) -> SentimentReport {
    match vector.dominant_emotion {
        Some(emotion) if emotion.is_positive() => {
            SentimentReport::new(SentimentLabel::Positive, vector.score(emotion))
        }
        Some(emotion) => SentimentReport::new(SentimentLabel::Negative, -vector.score(emotion)),
        None => SentimentReport::new(SentimentLabel::Neutral, 0.0),
    }
}
