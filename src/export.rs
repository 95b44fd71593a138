//! Export of the result panel to a plain-text file.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {path}: {source}")]
pub struct ExportError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// File name used for a translation into `target_code`.
pub fn export_file_name(target_code: &str) -> String {
    format!("translated-to-{target_code}.txt")
}

/// Write `text` to `dir/translated-to-<target_code>.txt`.
///
/// Returns `Ok(None)` without touching the filesystem when `text` is empty.
pub fn export_result(
    dir: &Path,
    text: &str,
    target_code: &str,
) -> Result<Option<PathBuf>, ExportError> {
    if text.is_empty() {
        return Ok(None);
    }

    let path = dir.join(export_file_name(target_code));
    write_file(&path, text).map_err(|source| ExportError {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = text.len(), "exported translation");
    Ok(Some(path))
}

fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}
