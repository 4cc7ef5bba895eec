//! Configuration module for the harvester
//!
//! Handles loading, parsing, and validating TOML configuration files. The
//! config file is optional: every field has a default, so a bare invocation
//! crawls the fixed catalog root.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, CrawlerConfig, OutputConfig, DEFAULT_ROOT_URL};

// Re-export parser functions
pub use parser::{default_config, load_config};
