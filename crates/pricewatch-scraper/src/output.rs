use std::path::Path;

use pricewatch_core::ProductSnapshot;

use crate::error::ScraperError;

/// Writes `snapshot` to `path` as 2-space indented JSON, replacing any
/// previous content. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the directory or file cannot be written.
pub fn persist(snapshot: &ProductSnapshot, path: &Path) -> Result<(), ScraperError> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let io_err = |source| ScraperError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)?;

    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}
