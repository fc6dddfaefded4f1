//! Reading exports from disk

use crate::app::services::pipeline::decode;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Read an export file and decode it as UTF-8 text
///
/// The path must exist and be a regular file. A leading byte-order mark is
/// skipped.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(Error::not_a_file(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    decode(&bytes)
}
