use std::io::Read;
use std::sync::Arc;
use streak_analyzer::{
    api::{handle_request, RequestEvent},
    config::Settings,
    fetch::HttpStreakSource,
    models::StreakError,
    pipeline::Analyzer,
    report::ReportRenderer,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Reads a request event as JSON on stdin and prints the response envelope.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new()?;
    if !Settings::sources_present() {
        warn!("No config files or STREAK_ANALYZER overrides found, using default settings");
    }
    settings.validate().map_err(StreakError::Config)?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let event: RequestEvent = if input.trim().is_empty() {
        RequestEvent::default()
    } else {
        serde_json::from_str(&input)?
    };

    let source = Arc::new(HttpStreakSource::new(settings.clone())?);
    let analyzer = Analyzer::new(source, &settings)?;
    let renderer = ReportRenderer::new(settings.qualification)?;

    let response = handle_request(&event, &analyzer, &renderer).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
