//! Crawler module: page fetching and the hierarchical traversal
//!
//! - HTTP client construction and page fetching
//! - The four-level crawl engine (model, year, equipment, manufacturer)
//!   with bounded concurrent fan-out at the lower levels

mod engine;
mod fetcher;

pub use engine::Engine;
pub use fetcher::{build_http_client, fetch_page};

use crate::config::Config;
use crate::Result;

/// Runs a complete harvest
///
/// This is the main entry point for crawling the catalog. It builds the
/// HTTP client, walks the catalog tree, and writes one JSON file per
/// equipment bundle below the configured output directory.
///
/// # Arguments
///
/// * `config` - The validated harvester configuration
///
/// # Returns
///
/// * `Ok(())` - every reachable bundle was written
/// * `Err(HarvestError)` - the run was aborted by its first failure
pub async fn harvest(config: Config) -> Result<()> {
    Engine::new(&config)?.run().await
}
