use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;

/// Read-only storage for documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn list(&self) -> Result<Value, ServiceError>;
}
