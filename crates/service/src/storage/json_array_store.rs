use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::{fs, sync::Mutex};
use tracing::{error, warn};

use crate::errors::ServiceError;

/// How a read-modify-write treats content that is not a JSON array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    /// Empty, unparsable, or non-array content becomes an empty collection.
    Lenient,
    /// Unparsable or non-array content is a `ServiceError::Corrupt`.
    Strict,
}

/// JSON file holding a single array of records.
///
/// Every read goes to disk; nothing is cached. Writes replace the whole file
/// through a sibling temp file and a rename, and mutations made through
/// [`JsonArrayStore::mutate`] are serialized by an async mutex. Other
/// processes writing the same file are not coordinated with.
pub struct JsonArrayStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonArrayStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Create parent directories and an empty array file if the file is missing.
    /// Returns whether the file was created.
    pub async fn ensure_exists(&self) -> Result<bool, ServiceError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Write(format!("{}: {e}", parent.display())))?;
        }
        if fs::metadata(&self.file_path).await.is_ok() {
            return Ok(false);
        }
        self.replace(&[]).await?;
        Ok(true)
    }

    /// Read the whole file as text.
    pub async fn read_raw(&self) -> Result<String, ServiceError> {
        fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| ServiceError::Read(format!("{}: {e}", self.file_path.display())))
    }

    /// Parse the file verbatim without checking its shape. An empty file reads as `[]`.
    pub async fn load_value(&self) -> Result<Value, ServiceError> {
        let data = self.read_raw().await?;
        if data.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        serde_json::from_str(&data)
            .map_err(|e| ServiceError::Corrupt(format!("{}: {e}", self.file_path.display())))
    }

    /// Read the collection, healing empty or malformed content to an empty one.
    /// Only the read itself can fail.
    pub async fn load_lenient(&self) -> Result<Vec<Value>, ServiceError> {
        let data = self.read_raw().await?;
        if data.trim().is_empty() {
            warn!(file = %self.file_path.display(), "collection file is empty; starting from an empty array");
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => {
                warn!(file = %self.file_path.display(), "collection is not an array; resetting to an empty array");
                Ok(Vec::new())
            }
            Err(e) => {
                error!(file = %self.file_path.display(), error = %e, "collection JSON parse error; resetting to an empty array");
                Ok(Vec::new())
            }
        }
    }

    /// Read the collection, failing on anything but a JSON array.
    pub async fn load_strict(&self) -> Result<Vec<Value>, ServiceError> {
        let data = self.read_raw().await?;
        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => Err(ServiceError::Corrupt(format!(
                "{}: collection is not an array",
                self.file_path.display()
            ))),
            Err(e) => Err(ServiceError::Corrupt(format!("{}: {e}", self.file_path.display()))),
        }
    }

    /// Replace the file with the given records, pretty-printed.
    pub async fn replace(&self, records: &[Value]) -> Result<(), ServiceError> {
        let mut data = serde_json::to_vec_pretty(records)
            .map_err(|e| ServiceError::Write(e.to_string()))?;
        data.push(b'\n');

        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, &data).await {
            return Err(ServiceError::Write(format!("{}: {e}", tmp.display())));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Write(format!("{}: {e}", self.file_path.display())));
        }
        Ok(())
    }

    /// Read, apply `f`, and write the collection back while holding the store lock.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn mutate<F, T>(&self, mode: LoadMode, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Value>) -> Result<T, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = match mode {
            LoadMode::Lenient => self.load_lenient().await?,
            LoadMode::Strict => self.load_strict().await?,
        };
        let out = f(&mut records)?;
        self.replace(&records).await?;
        Ok(out)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string());
        self.file_path.with_file_name(format!(".{name}.tmp"))
    }
}
