//! Compat-Harvester main entry point
//!
//! Command-line interface for the device compatibility catalog harvester.

use anyhow::Context;
use clap::Parser;
use compat_harvester::config::{default_config, load_config, Config};
use compat_harvester::crawler::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Compat-Harvester: a device compatibility catalog crawler
///
/// Crawls a hierarchical catalog site (car model, model year, equipment,
/// device manufacturer, device model) and writes one JSON compatibility
/// table per equipment bundle.
#[derive(Parser, Debug)]
#[command(name = "compat-harvester")]
#[command(version)]
#[command(about = "A device compatibility catalog crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            default_config().context("built-in defaults failed validation")?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    match harvest(config).await {
        Ok(()) => {
            tracing::info!("Harvest completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("compat_harvester=info,warn"),
            1 => EnvFilter::new("compat_harvester=debug,info"),
            2 => EnvFilter::new("compat_harvester=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Compat-Harvester Dry Run ===\n");

    println!("Catalog:");
    println!("  Root URL: {}", config.catalog.root_url);

    println!("\nCrawler:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} recursively", config.catalog.root_url);
}
