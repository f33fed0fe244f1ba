use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};

use crate::{
    dto::quiz_dto::IndexQuery,
    models::session::{QuizPhase, SessionId},
    services::grading_service::GradingService,
    views, AppState,
};

pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    if query.reset.is_some() {
        tracing::info!(%session, "Session reset from entry page");
        state.sessions.reset(session);
    }
    Html(views::index::index_page(state.max_questions).into_string())
}

pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Redirect {
    state.sessions.reset(session);
    Redirect::to("/")
}

pub async fn quiz(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    match state.sessions.read(session, |s| s.phase().clone()) {
        QuizPhase::Active(quiz) => Html(views::quiz::quiz_page(&quiz).into_string()).into_response(),
        QuizPhase::Submitted(_) => Redirect::to("/scoreboard").into_response(),
        QuizPhase::Idle | QuizPhase::Generating(_) => Redirect::to("/").into_response(),
    }
}

/// Grades the active quiz and shows the scoreboard straight away.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let quiz = match state.sessions.read(session, |s| s.phase().clone()) {
        QuizPhase::Active(quiz) => quiz,
        QuizPhase::Submitted(_) => return Redirect::to("/scoreboard").into_response(),
        QuizPhase::Idle | QuizPhase::Generating(_) => return Redirect::to("/").into_response(),
    };

    let answers = GradingService::collect_answers(quiz.questions.len(), &form);
    let submitted = state.quiz_service.submit(&quiz, &answers).await;
    let page = views::scoreboard::scoreboard_page(&submitted, None).into_string();

    match state
        .sessions
        .update(session, |s| s.record_submission(submitted))
    {
        Ok(()) => Html(page).into_response(),
        Err(e) => {
            tracing::warn!(%session, "Discarding graded quiz: {}", e);
            // A concurrent submit of the same quiz may have landed first.
            if state.sessions.read(session, |s| s.submitted().is_some()) {
                Redirect::to("/scoreboard").into_response()
            } else {
                Redirect::to("/").into_response()
            }
        }
    }
}

pub async fn scoreboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    let graded = state.sessions.read(session, |s| {
        s.submitted()
            .cloned()
            .map(|submitted| (submitted, s.latest_notes().map(String::from)))
    });

    match graded {
        Some((submitted, notes)) => {
            Html(views::scoreboard::scoreboard_page(&submitted, notes.as_deref()).into_string())
                .into_response()
        }
        None => Redirect::to("/").into_response(),
    }
}
