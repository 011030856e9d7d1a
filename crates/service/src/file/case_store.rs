use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::errors::ServiceError;
use crate::records::CaseRepository;
use crate::storage::{JsonArrayStore, LoadMode};

/// Field the store sets on every update.
pub const UPDATED_AT: &str = "updatedAt";

/// File store for cases, newest first.
///
/// - `create` heals an empty or malformed file to an empty collection.
/// - `update` refuses to touch a file that does not hold a JSON array.
pub struct CaseStore {
    store: JsonArrayStore,
}

impl CaseStore {
    /// Open the store at `path`. The file is not touched until the first request.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonArrayStore::new(path) })
    }

    /// Write an empty collection if the file does not exist yet.
    pub async fn init_if_missing(&self) -> Result<bool, ServiceError> {
        self.store.ensure_exists().await
    }

    /// The collection exactly as stored; array shape is not checked.
    pub async fn list(&self) -> Result<Value, ServiceError> {
        debug!(file = %self.store.path().display(), "reading cases");
        self.store.load_value().await.map_err(|e| {
            error!(error = %e, "error reading cases");
            e
        })
    }

    /// Prepend a case and return it as submitted.
    pub async fn create(&self, input: Option<Value>) -> Result<Value, ServiceError> {
        debug!(case = ?input, "received new case");
        let created = self
            .store
            .mutate(LoadMode::Lenient, |cases| {
                let case = match input {
                    Some(Value::Object(map)) => Value::Object(map),
                    other => {
                        error!(case = ?other, "invalid case data");
                        return Err(ServiceError::InvalidInput("case must be a JSON object".into()));
                    }
                };
                cases.insert(0, case.clone());
                Ok(case)
            })
            .await?;
        info!(id = ?created.get("id"), "new case saved");
        Ok(created)
    }

    /// Merge `updates` into the first case whose `id` is the string `id`.
    pub async fn update(&self, id: &str, updates: Option<Value>) -> Result<Value, ServiceError> {
        let updated = self
            .store
            .mutate(LoadMode::Strict, |cases| {
                let index = cases
                    .iter()
                    .position(|c| c.get("id").and_then(Value::as_str) == Some(id))
                    .ok_or_else(|| ServiceError::not_found("case"))?;
                let fields = update_fields(updates)?;
                let merged = merge_case(&cases[index], fields);
                cases[index] = merged.clone();
                Ok(merged)
            })
            .await?;
        info!(%id, "case updated");
        Ok(updated)
    }
}

/// Missing and `null` bodies carry no fields; anything else must be an object.
fn update_fields(updates: Option<Value>) -> Result<Map<String, Value>, ServiceError> {
    match updates {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ServiceError::InvalidInput("updates must be a JSON object".into())),
    }
}

/// Shallow merge: top-level fields of `fields` replace those of `existing`,
/// then `updatedAt` is stamped.
fn merge_case(existing: &Value, fields: Map<String, Value>) -> Value {
    let mut merged = existing.as_object().cloned().unwrap_or_default();
    let stamp = next_updated_at(merged.get(UPDATED_AT));
    for (k, v) in fields {
        merged.insert(k, v);
    }
    merged.insert(UPDATED_AT.to_string(), Value::String(stamp));
    Value::Object(merged)
}

/// Current time as `YYYY-MM-DDTHH:MM:SS.mmmZ`, strictly after `previous` when
/// that is a parseable timestamp.
fn next_updated_at(previous: Option<&Value>) -> String {
    let now = Utc::now().trunc_subsecs(3);
    let previous = previous
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc).trunc_subsecs(3));
    let stamp = match previous {
        Some(prev) if now <= prev => prev + Duration::milliseconds(1),
        _ => now,
    };
    stamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait::async_trait]
impl CaseRepository for CaseStore {
    async fn list(&self) -> Result<Value, ServiceError> { self.list().await }
    async fn create(&self, input: Option<Value>) -> Result<Value, ServiceError> { self.create(input).await }
    async fn update(&self, id: &str, updates: Option<Value>) -> Result<Value, ServiceError> { self.update(id, updates).await }
}
