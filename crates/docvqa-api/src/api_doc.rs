//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use docvqa_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DocVQA API",
        version = "0.1.0",
        description = "Document visual question answering: upload an image or PDF, then ask natural-language questions about it. Uploads land in S3-compatible object storage; answers come from a hosted BLIP VQA model."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::ask::ask_question,
        handlers::health::health,
        handlers::health::root,
    ),
    components(schemas(
        models::UploadResponse,
        models::AskRequest,
        models::AskResponse,
        models::HealthResponse,
        models::ServiceStatus,
        models::HealthConfiguration,
        ErrorResponse,
    )),
    tags(
        (name = "upload", description = "Document upload"),
        (name = "ask", description = "Question answering"),
        (name = "health", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
