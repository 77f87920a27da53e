//! Content Cascade CLI
//!
//! ## Usage
//!
//! ```bash
//! # Run with the default topic
//! content-cascade
//!
//! # Custom topic, budget and output directory
//! content-cascade "Neural networks in medicine" --max-iterations 5 --output-dir out/
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use content_cascade::models::iteration::RunStatus;
use content_cascade::storage::ConfigService;
use content_cascade::{AppState, Credentials};
use tracing::{info, warn};

const DEFAULT_TOPIC: &str = "Latest advancements in artificial intelligence";

/// Content Cascade - plan, research, draft and review an article
#[derive(Parser, Debug)]
#[command(name = "content-cascade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Topic to write about
    #[arg(default_value = DEFAULT_TOPIC)]
    topic: String,

    /// Maximum number of plan/research/draft passes (overrides config)
    #[arg(short = 'n', long)]
    max_iterations: Option<u32>,

    /// Directory receiving the generated artifacts (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to config.json (defaults to ~/.content-cascade/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::open(path),
        None => ConfigService::new(),
    }
    .context("failed to load configuration")?;

    let mut config = config_service.get_config_clone();
    if let Some(max) = cli.max_iterations {
        config.max_iterations = max;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let state = AppState::build(config, Credentials::from_env())
        .context("failed to initialise providers")?;

    info!(topic = %cli.topic, max_iterations = state.config().max_iterations, "starting editing process");
    let outcome = state.run(&cli.topic).await.context("editing process failed")?;

    match &outcome.status {
        RunStatus::Completed {
            iteration,
            article_path,
        } => {
            info!(
                iteration,
                article = %article_path.display(),
                images = outcome.images.len(),
                "article completed"
            );
        }
        RunStatus::Exhausted => {
            warn!(
                iterations = outcome.iterations_run,
                final_topic = %outcome.final_topic,
                "editing process finished without an accepted article"
            );
        }
    }

    if !outcome.report.is_empty() {
        println!("{}", outcome.report);
    }

    Ok(())
}
