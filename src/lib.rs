//! Compat-Harvester: a device compatibility catalog crawler
//!
//! This crate crawls a hierarchical, navigation-driven catalog site
//! (car model -> model year -> equipment -> device manufacturer -> device model)
//! and reconstructs its implicit tree into a file-persisted dataset:
//! one JSON compatibility table per equipment bundle.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod records;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Extraction failed on {url}: {source}")]
    Extraction {
        url: String,
        source: extract::ExtractError,
    },

    #[error("Output error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid catalog root URL: {0}")]
    InvalidRootUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::ExtractError;
pub use records::{DeviceFeatureSet, EquipmentBundle, FeatureRecord, SubFeatureRecord};
