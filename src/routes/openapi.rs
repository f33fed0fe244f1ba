use axum::Json;
use utoipa::OpenApi;

use crate::dto::quiz_dto::{ErrorResponse, NotesResponse, ReasoningRequest, ReasoningResponse};
use crate::routes::{api, health};

#[derive(OpenApi)]
#[openapi(
    paths(api::get_reasoning, api::generate_notes, health::health),
    components(schemas(ReasoningRequest, ReasoningResponse, NotesResponse, ErrorResponse)),
    tags((name = "study-quiz", description = "JSON endpoints of the study quiz service"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
