use serde::Deserialize;

/// Default catalog root crawled when no config file is given
pub const DEFAULT_ROOT_URL: &str = "https://compatibilitylist.skoda-auto.com";

/// Main configuration structure for the harvester
///
/// Every field has a default, so a bare invocation crawls the fixed catalog
/// root into the current directory.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Catalog source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root URL all traversal originates from. Navigation fragments found on
    /// pages are appended to it verbatim, so no trailing slash.
    #[serde(rename = "root-url")]
    pub root_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Upper bound on concurrently outstanding page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
            request_timeout_secs: 30,
            user_agent: concat!("compat-harvester/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the per-equipment JSON files are written beneath
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}
