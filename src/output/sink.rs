//! Bundle persistence: path sanitization and JSON encoding

use std::fs;
use std::path::{Path, PathBuf};

use crate::output::SinkResult;
use crate::records::EquipmentBundle;

/// Makes a catalog label safe for use as a path segment
///
/// Decodes the `&quot;` and `&amp;` entities the labels keep encoded, strips
/// CR/LF, replaces both slash characters with `_`, and removes spaces, in
/// that order.
pub fn sanitize(text: &str) -> String {
    text.replace("&quot;", "'")
        .replace("&amp;", "&")
        .replace('\r', "")
        .replace('\n', "")
        .replace('/', "_")
        .replace('\\', "_")
        .replace(' ', "")
}

/// Relative path of a bundle below the output directory
pub fn bundle_path(directory: &Path, bundle: &EquipmentBundle) -> PathBuf {
    directory
        .join(sanitize(&bundle.car_model))
        .join(sanitize(&bundle.model_year))
        .join(format!("{}.json", sanitize(&bundle.equipment)))
}

/// Writes a fully assembled bundle as an indented JSON document
///
/// Creates missing path directories recursively and overwrites any existing
/// file at the bundle's path (last writer wins, no merge). Callers only hand
/// over complete bundles, so a written file is always a valid artifact.
pub fn persist_bundle(directory: &Path, bundle: &EquipmentBundle) -> SinkResult<PathBuf> {
    let path = bundle_path(directory, bundle);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let encoded = serde_json::to_string_pretty(&bundle.devices)?;
    fs::write(&path, encoded)?;

    Ok(path)
}
