//! The five-emotion vector and dominant-emotion selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Sentinel written in place of a dominant emotion when no score is positive.
pub const NO_DOMINANT_EMOTION: &str = "none";

/// Emotion categories reported by Watson. Declaration order is the
/// tie-break order used by [`select_dominant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }

    /// Joy is the only positive emotion.
    pub fn is_positive(self) -> bool {
        self == Emotion::Joy
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("Unknown emotion: {}", s))
    }
}

/// Raw per-emotion scores as sent by the upstream. Missing keys read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }
}

/// Returns the emotion with the strictly greatest score.
///
/// Ties go to whichever emotion comes first in [`Emotion::ALL`]. When no score
/// is above zero there is no dominant emotion and `None` is returned.
pub fn select_dominant(scores: &EmotionScores) -> Option<Emotion> {
    let mut best: Option<(Emotion, f64)> = None;
    for emotion in Emotion::ALL {
        let score = scores.get(emotion);
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((emotion, score));
        }
    }
    best.map(|(emotion, _)| emotion)
}

/// Canonical emotion result returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmotionVector {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    #[serde(with = "dominant_name")]
    #[schema(value_type = String, example = "joy")]
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionVector {
    pub fn from_scores(scores: EmotionScores) -> Self {
        Self {
            anger: scores.anger,
            disgust: scores.disgust,
            fear: scores.fear,
            joy: scores.joy,
            sadness: scores.sadness,
            dominant_emotion: select_dominant(&scores),
        }
    }

    /// All-zero vector with no dominant emotion, used when the upstream
    /// response carries no emotion block.
    pub fn empty() -> Self {
        Self::from_scores(EmotionScores::default())
    }

    pub fn scores(&self) -> EmotionScores {
        EmotionScores {
            anger: self.anger,
            disgust: self.disgust,
            fear: self.fear,
            joy: self.joy,
            sadness: self.sadness,
        }
    }

    pub fn score(&self, emotion: Emotion) -> f64 {
        self.scores().get(emotion)
    }

    /// Dominant emotion name, or `"none"`.
    pub fn dominant_name(&self) -> &'static str {
        self.dominant_emotion
            .map_or(NO_DOMINANT_EMOTION, Emotion::as_str)
    }
}

mod dominant_name {
    use super::{Emotion, NO_DOMINANT_EMOTION};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Emotion>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.map_or(NO_DOMINANT_EMOTION, Emotion::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Emotion>, D::Error> {
        let name = String::deserialize(d)?;
        if name == NO_DOMINANT_EMOTION {
            return Ok(None);
        }
        name.parse().map(Some).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(anger: f64, disgust: f64, fear: f64, joy: f64, sadness: f64) -> EmotionScores {
        EmotionScores { anger, disgust, fear, joy, sadness }
    }

    #[test]
    fn test_highest_score_wins() {
        let s = scores(0.1, 0.05, 0.2, 0.9, 0.3);
        assert_eq!(select_dominant(&s), Some(Emotion::Joy));

        let s = scores(0.1, 0.05, 0.2, 0.3, 0.31);
        assert_eq!(select_dominant(&s), Some(Emotion::Sadness));
    }

    #[test]
    fn test_tie_uses_canonical_order() {
        // anger precedes joy, so anger wins a tie regardless of how the
        // scores were supplied
        let s = scores(0.1, 0.0, 0.05, 0.1, 0.0);
        assert_eq!(select_dominant(&s), Some(Emotion::Anger));

        let s = scores(0.0, 0.0, 0.4, 0.4, 0.4);
        assert_eq!(select_dominant(&s), Some(Emotion::Fear));
    }

    #[test]
    fn test_all_zero_has_no_dominant() {
        assert_eq!(select_dominant(&EmotionScores::default()), None);
        let empty = EmotionVector::empty();
        assert_eq!(empty.dominant_name(), "none");
    }

    #[test]
    fn test_vector_serializes_with_sentinel() {
        let json = serde_json::to_value(EmotionVector::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "anger": 0.0,
                "disgust": 0.0,
                "fear": 0.0,
                "joy": 0.0,
                "sadness": 0.0,
                "dominant_emotion": "none"
            })
        );
    }

    #[test]
    fn test_vector_deserializes_dominant() {
        let v: EmotionVector = serde_json::from_value(serde_json::json!({
            "anger": 0.6, "disgust": 0.1, "fear": 0.1, "joy": 0.0, "sadness": 0.2,
            "dominant_emotion": "anger"
        }))
        .unwrap();
        assert_eq!(v.dominant_emotion, Some(Emotion::Anger));
        assert_eq!(v.score(Emotion::Sadness), 0.2);
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let s: EmotionScores = serde_json::from_value(serde_json::json!({ "joy": 0.4 })).unwrap();
        assert_eq!(s, scores(0.0, 0.0, 0.0, 0.4, 0.0));
    }
}
