//! mystia-analyze - Mystic dependence analysis
//!
//! Reads a file of social-media posts, tags each post with a decision
//! scenario, scores sentiment and mystic dependence, clusters users, and
//! writes PNG charts plus a JSON report to the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use mystia_analyze::{AnalysisSettings, CliOverrides, Pipeline};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for mystia-analyze
#[derive(Parser, Debug)]
#[command(name = "mystia-analyze")]
#[command(about = "Scenario-based mystic dependence analysis of social-media posts")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Post file (JSON array or JSON Lines)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for charts and the JSON report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip PNG chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Report file name inside the output directory
    #[arg(long)]
    report: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing init so its log level can apply
    let toml_config = mystia_common::config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .init();

    info!(
        "Starting mystia-analyze v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let overrides = CliOverrides {
        input: args.input,
        output_dir: args.output_dir,
        report_file: args.report,
        no_charts: args.no_charts,
    };
    let settings = AnalysisSettings::resolve(&overrides, &toml_config)?;
    let report_path = settings.report_path();

    let output = Pipeline::new(settings)
        .run()
        .context("Analysis failed")?;

    info!(
        "Analysis complete: {} posts, {} warning(s), report at {}",
        output.posts.len(),
        output.report.warnings.len(),
        report_path.display()
    );
    Ok(())
}
