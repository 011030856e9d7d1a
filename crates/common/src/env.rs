//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories and files exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data directory exists; warn about collection files that are missing.
///
/// Missing collection files are not created here: list endpoints report a
/// read failure for them until they are seeded.
pub async fn ensure_env(data_dir: &Path, collection_files: &[&Path]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    for file in collection_files {
        if tokio::fs::metadata(file).await.is_err() {
            warn!(file = %file.display(), "collection file not found; reads will fail until it exists");
        }
    }
    Ok(())
}
