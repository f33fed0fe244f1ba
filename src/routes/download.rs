use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::{error::Error, AppState};

pub async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let path = match state.artifacts.resolve(&filename).await {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(filename = %filename, "Download refused: {}", e);
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", path.display(), e);
            return Error::from(e).into_response();
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response()
}
