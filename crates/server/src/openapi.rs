use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

/// A case: any JSON object carrying a string `id`. Other fields are stored as sent.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseDoc {
    pub id: String,
    /// Set by the server on every update (ISO-8601, UTC).
    pub updated_at: Option<String>,
}

/// Fields to merge into an existing case; any subset, plus caller-defined fields.
#[derive(Serialize, ToSchema)]
pub struct CaseUpdateDoc {
    pub id: Option<String>,
}

/// A document: any JSON object.
#[derive(ToSchema)]
pub struct DocumentDoc {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dashboard API",
        version = "1.0.0",
        description = "API for managing cases and documents"
    ),
    servers((url = "http://localhost:5000")),
    paths(
        crate::routes::health,
        crate::routes::cases::list_cases,
        crate::routes::cases::create_case,
        crate::routes::cases::update_case,
        crate::routes::documents::list_documents,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            CaseDoc,
            CaseUpdateDoc,
            DocumentDoc,
        )
    ),
    tags(
        (name = "Cases"),
        (name = "Documents"),
        (name = "health")
    )
)]
pub struct ApiDoc;
