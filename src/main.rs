use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use emotion_detector::api::{self, AppState};
use emotion_detector::{EmotionDetector, Endpoint, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    match &settings.endpoint {
        Endpoint::Internal => {
            tracing::info!(url = settings.endpoint.url(), "Using internal Watson NLP endpoint");
        }
        Endpoint::Public { feature, .. } => {
            if settings.api_key.is_empty() {
                tracing::warn!("WATSON_API_KEY is not set; public endpoint calls will be rejected");
            }
            tracing::info!(
                url = settings.endpoint.url(),
                feature = feature.as_str(),
                "Using public Watson NLU endpoint"
            );
        }
    }

    let state = Arc::new(AppState {
        detector: EmotionDetector::from_settings(&settings),
    });
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
