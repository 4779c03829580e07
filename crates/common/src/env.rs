//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use std::path::Path;

use tracing::warn;

/// Whether the fixtures override directory is usable. A missing directory is
/// not fatal: the bundled data is used instead.
pub async fn fixtures_dir_available(dir: &Path) -> bool {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            warn!(dir = %dir.display(), "fixtures path is not a directory; using bundled data");
            false
        }
        Err(_) => {
            warn!(dir = %dir.display(), "fixtures directory not found; using bundled data");
            false
        }
    }
}
