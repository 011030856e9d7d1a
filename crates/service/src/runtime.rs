//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can call
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the data directory exists; warn on missing collection files.
pub async fn ensure_env(data_dir: &Path, collection_files: &[&Path]) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, collection_files).await
}
