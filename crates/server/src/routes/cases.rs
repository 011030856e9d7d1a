use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use service::errors::ServiceError;
use tracing::{error, info, warn};

use crate::errors::JsonApiError;
use crate::metrics::{self, Op};
use crate::routes::AppState;

/// Parse a request body leniently: empty or non-JSON bodies become `None`
/// and are judged by the store.
fn parse_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "request body is not valid JSON");
            None
        }
    }
}

#[utoipa::path(
    get, path = "/api/cases", tag = "Cases",
    responses(
        (status = 200, description = "List of cases", body = [crate::openapi::CaseDoc]),
        (status = 500, description = "Failed to read cases data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list_cases(State(state): State<AppState>) -> Result<Json<Value>, JsonApiError> {
    match state.cases.list().await {
        Ok(cases) => {
            metrics::record_ok(Op::ListCases);
            Ok(Json(cases))
        }
        Err(e) => {
            metrics::record_err(Op::ListCases, &e);
            match e {
                ServiceError::Corrupt(_) => Err(JsonApiError::internal("Failed to parse cases data")),
                _ => Err(JsonApiError::internal("Failed to read cases data")),
            }
        }
    }
}

#[utoipa::path(
    post, path = "/api/cases", tag = "Cases",
    request_body = crate::openapi::CaseDoc,
    responses(
        (status = 201, description = "The created case", body = crate::openapi::CaseDoc),
        (status = 400, description = "Invalid case format", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to read or write cases data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create_case(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    match state.cases.create(parse_body(&body)).await {
        Ok(case) => {
            metrics::record_ok(Op::CreateCase);
            Ok((StatusCode::CREATED, Json(case)))
        }
        Err(e) => {
            metrics::record_err(Op::CreateCase, &e);
            match e {
                ServiceError::InvalidInput(_) => Err(JsonApiError::bad_request("Invalid case format")),
                ServiceError::Read(_) => {
                    error!(err = %e, "error reading cases");
                    Err(JsonApiError::internal("Failed to read cases data"))
                }
                ServiceError::Write(_) => {
                    error!(err = %e, "error writing cases");
                    Err(JsonApiError::internal("Failed to write new case"))
                }
                _ => {
                    error!(err = %e, "unexpected error while saving case");
                    Err(JsonApiError::internal("Unexpected error while saving case"))
                }
            }
        }
    }
}

#[utoipa::path(
    put, path = "/api/cases/{id}", tag = "Cases",
    params(("id" = String, Path, description = "Case identifier")),
    request_body = crate::openapi::CaseUpdateDoc,
    responses(
        (status = 200, description = "The updated case", body = crate::openapi::CaseDoc),
        (status = 400, description = "Invalid case format", body = crate::openapi::MessageDoc),
        (status = 404, description = "Case not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Failed to read, parse, or write cases data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, JsonApiError> {
    match state.cases.update(&id, parse_body(&body)).await {
        Ok(case) => {
            metrics::record_ok(Op::UpdateCase);
            Ok(Json(case))
        }
        Err(e) => {
            metrics::record_err(Op::UpdateCase, &e);
            match e {
                ServiceError::NotFound(_) => {
                    info!(%id, "case not found");
                    Err(JsonApiError::not_found("Case not found"))
                }
                ServiceError::InvalidInput(_) => Err(JsonApiError::bad_request("Invalid case format")),
                ServiceError::Read(_) => {
                    error!(err = %e, "error reading cases");
                    Err(JsonApiError::internal("Failed to read cases data"))
                }
                ServiceError::Corrupt(_) => {
                    error!(err = %e, "cases file is not a JSON array");
                    Err(JsonApiError::internal("Failed to parse cases.json"))
                }
                ServiceError::Write(_) => {
                    error!(err = %e, "error writing cases");
                    Err(JsonApiError::internal("Failed to write updated case"))
                }
            }
        }
    }
}
