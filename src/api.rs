//! HTTP surface: request parsing, status mapping and the router.

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::detector::EmotionDetector;
use crate::emotion::{Emotion, EmotionVector};
use crate::error::{ErrorDescriptor, ErrorKind};
use crate::normalize::Analysis;
use crate::sentiment::{SentimentLabel, SentimentReport, SentimentResult};

pub const SERVICE_NAME: &str = "Emotion Detection API";

#[derive(OpenApi)]
#[openapi(
    paths(emotion_detector, health_check),
    components(
        schemas(
            AnalyzeRequest,
            AnalyzeResponse,
            ErrorResponse,
            HealthResponse,
            EmotionVector,
            Emotion,
            SentimentReport,
            SentimentResult,
            SentimentLabel
        )
    ),
    tags(
        (name = "emotion", description = "Emotion and sentiment analysis"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub struct AppState {
    pub detector: EmotionDetector,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    #[schema(example = "I love my life")]
    pub text: String,
}

/// Success body. Exactly one of `emotions` (emotion schema) or `data`
/// (sentiment schema or keyword fallback) is present.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    #[schema(example = "success")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<EmotionVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SentimentReport>,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        let (emotions, data) = match analysis {
            Analysis::Emotion(vector) => (Some(vector), None),
            Analysis::Sentiment(report) => (None, Some(report)),
        };
        AnalyzeResponse {
            status: "success".to_string(),
            emotions,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[schema(example = "error")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, details: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            status: "error".to_string(),
            details,
        }),
    )
}

/// Upstream trouble is a 503; a failure we could not classify is a 500.
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnexpectedFailure => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::ConnectionFailure
        | ErrorKind::Timeout
        | ErrorKind::RequestFailure
        | ErrorKind::UpstreamError => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<ErrorDescriptor> for ErrorResponse {
    fn from(e: ErrorDescriptor) -> Self {
        ErrorResponse {
            error: e.message,
            status: "error".to_string(),
            details: Some(e.details.unwrap_or_default()),
        }
    }
}

/// `text` from either a JSON body or a urlencoded form.
pub struct TextInput(pub String);

#[async_trait]
impl<S> FromRequest<S> for TextInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        let body = if is_json {
            Json::<AnalyzeRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, "Invalid request body", Some(e.body_text()))
                })?
        } else {
            Form::<AnalyzeRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, "Invalid request body", Some(e.body_text()))
                })?
        };

        Ok(TextInput(body.text))
    }
}

/// Analyze the emotion of a piece of text.
#[utoipa::path(
    post,
    path = "/emotionDetector",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result", body = AnalyzeResponse),
        (status = 400, description = "No text provided", body = ErrorResponse),
        (status = 500, description = "Unexpected upstream response", body = ErrorResponse),
        (status = 503, description = "Analysis service unavailable", body = ErrorResponse)
    ),
    tag = "emotion"
)]
pub async fn emotion_detector(
    State(state): State<Arc<AppState>>,
    TextInput(text): TextInput,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if text.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "No text provided for analysis",
            None,
        ));
    }

    match state.detector.analyze(&text).await {
        Ok(analysis) => Ok(Json(analysis.into())),
        Err(e) => {
            let status = status_for(e.kind);
            Err((status, Json(e.into())))
        }
    }
}

/// Health check for monitoring.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Endpoint not found", None)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/emotionDetector", post(emotion_detector))
        .route("/health", get(health_check))
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Timeout), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorKind::ConnectionFailure), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorKind::UpstreamError), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorKind::UnexpectedFailure), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_picks_field_by_shape() {
        let body = serde_json::to_value(AnalyzeResponse::from(Analysis::Emotion(
            EmotionVector::empty(),
        )))
        .unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["emotions"]["dominant_emotion"], "none");
        assert!(body.get("data").is_none());

        let body = serde_json::to_value(AnalyzeResponse::from(Analysis::Sentiment(
            SentimentReport::new(SentimentLabel::Positive, 0.5),
        )))
        .unwrap();
        assert_eq!(body["data"]["documentSentiment"]["label"], "positive");
        assert!(body.get("emotions").is_none());
    }

    #[test]
    fn test_error_body_always_has_details() {
        let mut e = ErrorDescriptor::timeout("slow");
        e.details = None;
        let body = serde_json::to_value(ErrorResponse::from(e)).unwrap();
        assert_eq!(body["details"], "");
        assert_eq!(body["status"], "error");
    }
}
