use axum::{extract::State, Json};
use serde_json::Value;

use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::metrics::{self, Op};
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/api/documents", tag = "Documents",
    responses(
        (status = 200, description = "List of documents", body = [crate::openapi::DocumentDoc]),
        (status = 500, description = "Failed to read documents data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Value>, JsonApiError> {
    match state.documents.list().await {
        Ok(docs) => {
            metrics::record_ok(Op::ListDocuments);
            Ok(Json(docs))
        }
        Err(e) => {
            metrics::record_err(Op::ListDocuments, &e);
            match e {
                ServiceError::Corrupt(_) => Err(JsonApiError::internal("Failed to parse documents data")),
                _ => Err(JsonApiError::internal("Failed to read documents data")),
            }
        }
    }
}
