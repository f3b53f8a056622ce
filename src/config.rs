//! Endpoint selection and process settings.
//!
//! Everything here is derived from environment variables (after `.env` has
//! been loaded by the binary). The lookup-based constructors take any
//! key -> value source so the same resolution runs in tests without touching
//! the process environment.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Map, Value};

use crate::detector::Fallback;

/// Watson NLP runtime reachable only from inside the lab network.
pub const INTERNAL_URL: &str = "https://sn-watson-sentiment-bert.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/SentimentPredict";

pub const PUBLIC_URL_PLACEHOLDER: &str = "https://api.us-south.natural-language-understanding.watson.cloud.ibm.com/instances/YOUR_INSTANCE_ID/v1/analyze?version=2022-04-07";

const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";
const MODEL_ID: &str = "sentiment_aggregated-bert-workflow_lang_multi_stock";

/// Basic-auth user name the public service expects alongside the API key.
pub const API_KEY_USER: &str = "apikey";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Which analysis the public endpoint is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feature {
    #[default]
    Emotion,
    Sentiment,
}

impl Feature {
    /// Unknown values fall back to emotion.
    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sentiment" => Feature::Sentiment,
            _ => Feature::Emotion,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Emotion => "emotion",
            Feature::Sentiment => "sentiment",
        }
    }
}

/// How to reach one upstream analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Watson NLP runtime, sentiment model selected by header.
    Internal,
    /// IBM Watson Natural Language Understanding, basic auth.
    Public { url: String, feature: Feature },
}

impl Endpoint {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_public = lookup("USE_PUBLIC_WATSON")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if !use_public {
            return Endpoint::Internal;
        }

        Endpoint::Public {
            url: lookup("WATSON_URL").unwrap_or_else(|| PUBLIC_URL_PLACEHOLDER.to_string()),
            feature: lookup("WATSON_FEATURE")
                .map(|v| Feature::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Endpoint::Internal => INTERNAL_URL,
            Endpoint::Public { url, .. } => url,
        }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match self {
            Endpoint::Internal => {
                headers.insert(
                    HeaderName::from_static(MODEL_ID_HEADER),
                    HeaderValue::from_static(MODEL_ID),
                );
            }
            Endpoint::Public { .. } => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }
        headers
    }

    /// Request body for `text`.
    pub fn payload(&self, text: &str) -> Value {
        match self {
            Endpoint::Internal => json!({ "raw_document": { "text": text } }),
            Endpoint::Public { feature, .. } => {
                let mut features = Map::new();
                features.insert(feature.as_str().to_string(), json!({ "document": true }));
                json!({ "text": text, "features": features })
            }
        }
    }

    /// Only the public service takes basic auth.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Endpoint::Public { .. })
    }
}

/// Endpoint picked by the current process environment.
pub fn get_active_endpoint() -> Endpoint {
    Endpoint::from_lookup(|key| std::env::var(key).ok())
}

/// Everything the binaries need to build a detector and serve it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Endpoint,
    /// Empty when unset; the upstream rejects the call rather than us.
    pub api_key: String,
    pub fallback: Fallback,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = match lookup("EMOTION_FALLBACK")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            Some("false") | Some("0") | Some("no") | Some("off") => Fallback::Disabled,
            _ => Fallback::Enabled,
        };

        Self {
            endpoint: Endpoint::from_lookup(&lookup),
            api_key: lookup("WATSON_API_KEY").unwrap_or_default(),
            fallback,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}
