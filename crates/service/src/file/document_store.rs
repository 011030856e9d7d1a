use std::{path::PathBuf, sync::Arc};

use serde_json::Value;

use crate::errors::ServiceError;
use crate::records::DocumentRepository;
use crate::storage::JsonArrayStore;

/// Read-only file store for documents.
pub struct DocumentStore {
    store: JsonArrayStore,
}

impl DocumentStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonArrayStore::new(path) })
    }

    pub async fn init_if_missing(&self) -> Result<bool, ServiceError> {
        self.store.ensure_exists().await
    }

    pub async fn list(&self) -> Result<Value, ServiceError> {
        self.store.load_value().await
    }
}

#[async_trait::async_trait]
impl DocumentRepository for DocumentStore {
    async fn list(&self) -> Result<Value, ServiceError> { self.list().await }
}
