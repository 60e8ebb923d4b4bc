//! Bilderfang main entry point
//!
//! This is the command-line interface for the Bilderfang image harvester.

use bilderfang::config::{load_config, Config};
use bilderfang::crawler::harvest;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Bilderfang: a website image harvester
///
/// Bilderfang opens a site in a headless browser, walks its navigation,
/// and downloads every image its sections display into a timestamped
/// archive, together with an xlsx log of what was stored and from where.
#[derive(Parser, Debug)]
#[command(name = "bilderfang")]
#[command(version = "1.0.0")]
#[command(about = "A website image harvester", long_about = None)]
struct Cli {
    /// URL of the site to harvest
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory to collect run folders in (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to the defaults
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(output_dir) = cli.output_dir {
        config.output.root_dir = output_dir;
    }

    let site = match Url::parse(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Invalid URL '{}': {}", cli.url, e);
            return Err(e.into());
        }
    };

    handle_harvest(&site, config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bilderfang=info,warn"),
            1 => EnvFilter::new("bilderfang=debug,info"),
            2 => EnvFilter::new("bilderfang=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main harvest operation
async fn handle_harvest(site: &Url, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Harvesting images from {}", site);
    tracing::info!("Archive root: {}", config.output.root_dir.display());

    match harvest(site, config).await {
        Ok(summary) => {
            println!("\n✓ {} sections crawled", summary.sections);
            println!("✓ {} images stored", summary.stored());
            if summary.failed > 0 {
                println!("  {} images failed, see log output above", summary.failed);
            }
            println!("✓ Audit log: {}", summary.log_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
