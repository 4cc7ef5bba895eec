//! Result sink: file-persisted equipment bundles
//!
//! Each equipment bundle becomes one JSON document at a path derived from
//! the sanitized labels of its tree position:
//! `<car model>/<model year>/<equipment>.json`.

mod sink;

pub use sink::{bundle_path, persist_bundle, sanitize};

use thiserror::Error;

/// Errors that can occur while persisting a bundle
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode bundle: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;
