use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use streak_analyzer::{
    config::Settings,
    fetch::{FileStreakSource, HttpStreakSource, StreakSource},
    models::StreakError,
    pipeline::Analyzer,
    report::ReportRenderer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "streak-analyzer")]
#[clap(about = "Compare the achievement streaks of two gamers", long_about = None)]
struct Cli {
    /// First gamer id
    #[clap(value_parser = clap::value_parser!(u64))]
    gamer_id_1: u64,

    /// Second gamer id
    #[clap(value_parser = clap::value_parser!(u64))]
    gamer_id_2: u64,

    /// Number of streaks to show per category
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// Where to write the report
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Settings file to load instead of config/default and config/local
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Read saved <gamer_id>.html pages from this directory instead of the site
    #[clap(long)]
    offline_dir: Option<PathBuf>,

    /// Print the ranked comparison as JSON instead of writing the report
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level)),
        )
        .init();

    if cli.config.is_none() && !Settings::sources_present() {
        warn!("No config files or STREAK_ANALYZER overrides found, using default settings");
    }

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(StreakError::Config(e).into());
    }

    let source: Arc<dyn StreakSource> = match &cli.offline_dir {
        Some(dir) => Arc::new(FileStreakSource::new(dir)),
        None => Arc::new(HttpStreakSource::new(settings.clone())?),
    };

    let mut analyzer = Analyzer::new(source, &settings)?;
    if let Some(count) = cli.count {
        analyzer = analyzer.with_num_to_display(count);
    }

    let comparison = analyzer
        .compare(&cli.gamer_id_1.to_string(), &cli.gamer_id_2.to_string())
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&settings.report.output_path));
    ReportRenderer::new(settings.qualification)?.write_to(&comparison, &output)?;

    info!(
        "Compared {} and {}",
        comparison.first.identifier, comparison.second.identifier
    );
    println!("Report written to {}", output.display());

    Ok(())
}
