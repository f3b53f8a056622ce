//! Emotion detection backed by Watson NLP.
//!
//! [`detector::EmotionDetector`] sends text to the configured Watson endpoint
//! and normalizes whatever schema comes back into an [`normalize::Analysis`].
//! When the service cannot be reached, [`fallback::mock_analyze`] produces an
//! offline keyword estimate instead.

pub mod api;
pub mod config;
pub mod detector;
pub mod emotion;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod sentiment;

pub use config::{get_active_endpoint, Endpoint, Settings};
pub use detector::{EmotionDetector, Fallback, FailureHook};
pub use emotion::{select_dominant, Emotion, EmotionVector};
pub use error::{ErrorDescriptor, ErrorKind};
pub use fallback::mock_analyze;
pub use normalize::Analysis;
pub use sentiment::{to_sentiment, SentimentLabel, SentimentReport};
