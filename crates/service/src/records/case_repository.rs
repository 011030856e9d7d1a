use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;

/// Storage for cases: list, create (prepend), and partial update by `id`.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// The whole collection as stored.
    async fn list(&self) -> Result<Value, ServiceError>;
    /// Prepend a new case. `None` stands for a missing or unparsable body.
    async fn create(&self, input: Option<Value>) -> Result<Value, ServiceError>;
    /// Shallow-merge `updates` into the case whose `id` equals `id`.
    async fn update(&self, id: &str, updates: Option<Value>) -> Result<Value, ServiceError>;
}
