//! Command-line emotion detection.
//!
//! Prints the analysis as JSON, or as a short report with `--formatted`.

use clap::Parser;
use dotenv::dotenv;
use std::fmt::Write as _;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use emotion_detector::{
    mock_analyze, Analysis, Emotion, EmotionDetector, EmotionVector, ErrorDescriptor, Fallback,
    SentimentLabel, SentimentReport, Settings,
};

/// Analyze emotion/sentiment of text using Watson NLP.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    after_help = "Example: emotion_detection \"I love this product!\""
)]
struct Args {
    /// Text to analyze for emotion/sentiment.
    text: String,

    /// Print a human-readable report instead of JSON.
    #[arg(long)]
    formatted: bool,

    /// Report service failures instead of using the keyword analyzer.
    #[arg(long)]
    no_fallback: bool,

    /// Skip the service and use the keyword analyzer directly.
    #[arg(long)]
    mock: bool,
}

fn emoji_for(dominant: Option<Emotion>) -> &'static str {
    match dominant {
        Some(Emotion::Joy) => "😊",
        Some(Emotion::Anger) => "😡",
        Some(Emotion::Disgust) => "🤢",
        Some(Emotion::Fear) => "😨",
        Some(Emotion::Sadness) => "😢",
        None => "😐",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_emotions(text: &str, v: &EmotionVector) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} Emotion Analysis Results:", emoji_for(v.dominant_emotion));
    let _ = writeln!(out, "   Text: \"{}\"", text);
    let _ = writeln!(out, "\n   Emotion Scores:");
    let _ = writeln!(out, "     Joy:      {:.3}", v.joy);
    let _ = writeln!(out, "     Anger:    {:.3}", v.anger);
    let _ = writeln!(out, "     Disgust:  {:.3}", v.disgust);
    let _ = writeln!(out, "     Fear:     {:.3}", v.fear);
    let _ = writeln!(out, "     Sadness:  {:.3}", v.sadness);
    let _ = writeln!(out, "\n   Dominant Emotion: {}", capitalize(v.dominant_name()));
    out
}

fn format_sentiment(text: &str, report: &SentimentReport) -> String {
    let emoji = match report.label() {
        SentimentLabel::Positive => "😊",
        SentimentLabel::Negative => "😞",
        SentimentLabel::Neutral => "😐",
    };
    let mut out = String::new();
    let _ = writeln!(out, "\n{} Sentiment Analysis Results:", emoji);
    let _ = writeln!(out, "   Text: \"{}\"", text);
    let _ = writeln!(out, "\n   Sentiment: {}", capitalize(report.label().as_str()));
    let _ = writeln!(out, "   Score:     {:.3}", report.score());
    if report.mock {
        let _ = writeln!(out, "\n   Note: keyword analyzer used (Watson service unavailable)");
    }
    out
}

fn format_error(e: &ErrorDescriptor) -> String {
    let mut out = format!("\n❌ Error: {}\n", e.message);
    if let Some(details) = &e.details {
        let _ = writeln!(out, "   Details: {}", details);
    }
    out
}

fn render(text: &str, result: &Result<Analysis, ErrorDescriptor>, formatted: bool) -> String {
    if formatted {
        return match result {
            Ok(Analysis::Emotion(v)) => format_emotions(text, v),
            Ok(Analysis::Sentiment(report)) => format_sentiment(text, report),
            Err(e) => format_error(e),
        };
    }

    let json = match result {
        Ok(analysis) => serde_json::to_string_pretty(analysis),
        Err(e) => serde_json::to_string_pretty(e),
    };
    json.unwrap_or_else(|e| format!("Unexpected response format: {}", e))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = if args.mock {
        Ok(Analysis::Sentiment(mock_analyze(&args.text)))
    } else {
        let settings = Settings::from_env();
        let fallback = if args.no_fallback {
            Fallback::Disabled
        } else {
            settings.fallback
        };
        EmotionDetector::from_settings(&settings)
            .analyze_with(&args.text, fallback)
            .await
    };

    println!("{}", render(&args.text, &result, args.formatted));

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
