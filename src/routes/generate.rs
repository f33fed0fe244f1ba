use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use crate::{
    dto::quiz_dto::GenerateForm,
    error::{Error, Result},
    models::question::{Difficulty, QuizSource},
    models::session::{ActiveQuiz, SessionId},
    AppState,
};

async fn read_form(mut multipart: Multipart) -> Result<GenerateForm> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        Error::BadRequest("Malformed form submission".into())
    })? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was picked.
                if !filename.is_empty() && !data.is_empty() {
                    form.file = Some((filename, data));
                }
            }
            "topic" => {
                let topic = field.text().await?;
                let topic = topic.trim();
                if !topic.is_empty() {
                    form.topic = Some(topic.to_string());
                }
            }
            "num_questions" => form.num_questions = Some(field.text().await?),
            "difficulty" => form.difficulty = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// Parses the requested count and clamps it to `max`.
pub fn parse_question_count(raw: Option<&str>, max: usize) -> Result<usize> {
    let count = raw
        .map(str::trim)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::BadRequest("Please enter a valid number of questions.".into()))?;
    Ok(count.min(max.max(1)))
}

async fn start_quiz(state: &AppState, session: SessionId, multipart: Multipart) -> Result<usize> {
    let form = read_form(multipart).await?;

    let num_questions = parse_question_count(form.num_questions.as_deref(), state.max_questions)?;
    let difficulty: Difficulty = form
        .difficulty
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(Error::BadRequest)?;

    let source = match (form.file, form.topic) {
        (Some((filename, data)), _) => state.upload_service.save_and_extract(&filename, &data).await?,
        (None, Some(topic)) => QuizSource::Topic(topic),
        (None, None) => {
            return Err(Error::BadRequest("Please provide either a file or a topic.".into()))
        }
    };

    let generation = state.sessions.update(session, |s| s.begin_generation());
    tracing::info!(%session, num_questions, %difficulty, "Generating quiz");

    let questions = match state
        .ai_service
        .generate_questions(&source, num_questions, difficulty)
        .await
    {
        Ok(questions) => questions,
        Err(e) => {
            state
                .sessions
                .update(session, |s| s.abort_generation(generation));
            return Err(e);
        }
    };

    let count = questions.len();
    let quiz = ActiveQuiz {
        questions,
        source_text: source.content().to_string(),
        from_file: source.is_file(),
    };
    state
        .sessions
        .update(session, |s| s.complete_generation(generation, quiz))?;
    Ok(count)
}

pub async fn generate(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    multipart: Multipart,
) -> Response {
    match start_quiz(&state, session, multipart).await {
        Ok(count) => {
            tracing::info!(%session, count, "Quiz ready");
            Redirect::to("/quiz").into_response()
        }
        Err(e) => {
            tracing::warn!(%session, "Quiz generation rejected: {}", e);
            (e.status_code(), e.user_message()).into_response()
        }
    }
}
