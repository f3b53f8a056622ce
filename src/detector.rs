//! Remote emotion analysis with typed failures and an offline fallback.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Endpoint, Settings, API_KEY_USER};
use crate::error::ErrorDescriptor;
use crate::fallback::mock_analyze;
use crate::normalize::{normalize, Analysis};
use crate::sentiment::SentimentReport;

/// Upper bound for one upstream call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether network failures are replaced by the keyword analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    #[default]
    Enabled,
    Disabled,
}

/// Observer told about every failed call before its result is returned.
pub trait FailureHook: Send + Sync {
    fn on_failure(&self, error: &ErrorDescriptor);

    /// Called after `on_failure` when the failure is replaced by a mock result.
    fn on_fallback(&self, _error: &ErrorDescriptor) {}
}

/// Default hook: logs through `tracing`.
pub struct TracingHook;

impl FailureHook for TracingHook {
    fn on_failure(&self, error: &ErrorDescriptor) {
        tracing::warn!(
            kind = %error.kind,
            details = error.details.as_deref().unwrap_or_default(),
            "{}",
            error.message
        );
    }

    fn on_fallback(&self, error: &ErrorDescriptor) {
        tracing::info!(kind = %error.kind, "Using keyword sentiment analyzer as fallback");
    }
}

/// Client for the configured Watson endpoint.
///
/// Cheap to clone; every call is independent and makes exactly one request.
#[derive(Clone)]
pub struct EmotionDetector {
    client: reqwest::Client,
    endpoint: Endpoint,
    api_key: String,
    fallback: Fallback,
    timeout: Duration,
    hook: Arc<dyn FailureHook>,
}

impl EmotionDetector {
    pub fn new(endpoint: Endpoint, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
            fallback: Fallback::default(),
            timeout: REQUEST_TIMEOUT,
            hook: Arc::new(TracingHook),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.endpoint.clone(), settings.api_key.clone())
            .with_fallback(settings.fallback)
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn FailureHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyzes `text` using the detector's configured fallback mode.
    ///
    /// Blank input is not rejected here; it is sent upstream as-is.
    pub async fn analyze(&self, text: &str) -> Result<Analysis, ErrorDescriptor> {
        self.analyze_with(text, self.fallback).await
    }

    /// Analyzes `text`; with [`Fallback::Enabled`] any network-level failure
    /// yields the keyword estimate instead of an error.
    pub async fn analyze_with(
        &self,
        text: &str,
        fallback: Fallback,
    ) -> Result<Analysis, ErrorDescriptor> {
        let error = match self.call(text).await {
            Ok(analysis) => return Ok(analysis),
            Err(error) => error,
        };

        self.hook.on_failure(&error);
        if fallback == Fallback::Enabled && error.kind.is_network() {
            self.hook.on_fallback(&error);
            return Ok(Analysis::Sentiment(mock_analyze(text)));
        }
        Err(error)
    }

    /// Sentiment view of [`analyze`](Self::analyze). Errors pass through.
    pub async fn sentiment(&self, text: &str) -> Result<SentimentReport, ErrorDescriptor> {
        self.analyze(text).await.map(Analysis::into_sentiment)
    }

    /// Always produces a sentiment. `force_mock` skips the network entirely;
    /// otherwise any error, upstream-reported ones included, is replaced by
    /// the keyword estimate.
    pub async fn sentiment_with_fallback(&self, text: &str, force_mock: bool) -> SentimentReport {
        if force_mock {
            return mock_analyze(text);
        }
        match self.sentiment(text).await {
            Ok(report) => report,
            Err(error) => {
                self.hook.on_fallback(&error);
                mock_analyze(text)
            }
        }
    }

    async fn call(&self, text: &str) -> Result<Analysis, ErrorDescriptor> {
        let mut request = self
            .client
            .post(self.endpoint.url())
            .headers(self.endpoint.headers())
            .timeout(self.timeout)
            .json(&self.endpoint.payload(text));

        if self.endpoint.requires_auth() {
            request = request.basic_auth(API_KEY_USER, Some(&self.api_key));
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body)?;
        normalize(&body)
    }
}
