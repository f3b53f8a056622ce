//! Reshapes upstream response bodies into the canonical output shapes.
//!
//! Each upstream schema maps to exactly one shape:
//!
//! | upstream body                              | result                    |
//! |--------------------------------------------|---------------------------|
//! | `{"emotion": {"document": {"emotion": …}}}` | [`Analysis::Emotion`]    |
//! | `{"sentiment": {"document": …}}`            | [`Analysis::Sentiment`]  |
//! | `{"documentSentiment": …}`                  | [`Analysis::Sentiment`]  |
//! | `{"error": …}`                              | upstream-error           |
//! | anything else                               | zero vector, `"none"`    |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emotion::{EmotionScores, EmotionVector};
use crate::error::ErrorDescriptor;
use crate::sentiment::{to_sentiment, SentimentLabel, SentimentReport};

/// A successful analysis, in whichever shape the upstream schema produced.
/// Serializes untagged: callers branch on the presence of `dominant_emotion`
/// or `documentSentiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Emotion(EmotionVector),
    Sentiment(SentimentReport),
}

impl Analysis {
    /// Sentiment view of the analysis. Sentiment results pass through as-is.
    pub fn into_sentiment(self) -> SentimentReport {
        match self {
            Analysis::Emotion(vector) => to_sentiment(&vector),
            Analysis::Sentiment(report) => report,
        }
    }

    /// True when produced by the offline keyword analyzer.
    pub fn is_mock(&self) -> bool {
        matches!(self, Analysis::Sentiment(report) if report.mock)
    }
}

/// Normalizes a parsed 2xx response body.
pub fn normalize(body: &Value) -> Result<Analysis, ErrorDescriptor> {
    if let Some(scores) = body.pointer("/emotion/document/emotion") {
        let scores = EmotionScores::deserialize(scores)?;
        return Ok(Analysis::Emotion(EmotionVector::from_scores(scores)));
    }

    if let Some(document) = body
        .pointer("/sentiment/document")
        .or_else(|| body.get("documentSentiment"))
    {
        return Ok(Analysis::Sentiment(read_sentiment(document)));
    }

    if let Some(error) = body.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(ErrorDescriptor::upstream(
            format!("Upstream Error: {}", message),
            body.to_string(),
        ));
    }

    Ok(Analysis::Emotion(EmotionVector::empty()))
}

fn read_sentiment(document: &Value) -> SentimentReport {
    let label = document
        .get("label")
        .and_then(Value::as_str)
        .map(SentimentLabel::from_upstream)
        .unwrap_or(SentimentLabel::Neutral);
    let score = document.get("score").and_then(Value::as_f64).unwrap_or(0.0);
    SentimentReport::new(label, score)
}
