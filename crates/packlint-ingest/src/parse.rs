//! Structured-file reading: YAML and JSON content definitions.

use std::path::Path;

use serde_json::Value;

use crate::error::{IngestError, Result};

/// Read and parse a YAML or JSON content file into a normalized mapping.
pub fn read_structured(path: &Path) -> Result<Value> {
    let text =
        std::fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    parse_structured(path, &text)
}

/// Parse file text according to the path's extension.
///
/// YAML values are normalized into `serde_json::Value` so rules work on one
/// representation regardless of the on-disk format.
pub fn parse_structured(path: &Path, text: &str) -> Result<Value> {
    match extension(path).as_deref() {
        Some("json") => serde_json::from_str(text).map_err(|error| IngestError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }),
        Some("yml" | "yaml") => serde_yaml::from_str(text).map_err(|error| IngestError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }),
        _ => Err(IngestError::UnsupportedFile {
            path: path.to_path_buf(),
        }),
    }
}

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// True for the extensions that can hold content item definitions.
pub fn is_structured_file(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("json" | "yml" | "yaml"))
}
