use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::{
    dto::quiz_dto::{ErrorResponse, NotesResponse, ReasoningRequest, ReasoningResponse},
    models::session::SessionId,
    AppState,
};

fn error_json(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error))).into_response()
}

#[utoipa::path(
    post,
    path = "/get_reasoning",
    request_body = ReasoningRequest,
    responses(
        (status = 200, description = "Explanation generated", body = ReasoningResponse),
        (status = 400, description = "Missing or empty question/correct_answer", body = ErrorResponse),
        (status = 429, description = "Too many generation requests for this session"),
        (status = 500, description = "Generation service failed", body = ErrorResponse),
    )
)]
pub async fn get_reasoning(
    State(state): State<AppState>,
    payload: Result<Json<ReasoningRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_json(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    if let Err(e) = payload.validate() {
        return error_json(StatusCode::BAD_REQUEST, e.to_string());
    }

    match state
        .ai_service
        .explain_answer(&payload.question, &payload.correct_answer)
        .await
    {
        Ok(reasoning) => Json(ReasoningResponse {
            reasoning,
            status: "success".to_string(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Reasoning request failed: {}", e);
            error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[utoipa::path(
    post,
    path = "/generate_notes",
    responses(
        (status = 200, description = "Study notes PDF written", body = NotesResponse),
        (status = 400, description = "The session holds no quiz", body = ErrorResponse),
        (status = 429, description = "Too many generation requests for this session"),
        (status = 500, description = "Notes could not be generated", body = ErrorResponse),
    )
)]
pub async fn generate_notes(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    let Some(quiz) = state.sessions.read(session, |s| s.current_quiz().cloned()) else {
        return error_json(StatusCode::BAD_REQUEST, "No quiz in the current session");
    };

    match state.quiz_service.generate_notes(&quiz).await {
        Ok(filename) => {
            state.sessions.update(session, |s| {
                if s.current_quiz() == Some(&quiz) {
                    s.set_latest_notes(filename.clone());
                }
            });
            Json(NotesResponse {
                status: "success".to_string(),
                notes_path: filename,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(%session, "Notes generation failed: {}", e);
            error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
