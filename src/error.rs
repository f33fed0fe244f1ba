use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Generation service error: {0}")]
    Generation(String),

    #[error("No valid questions could be parsed from the generated text")]
    NoValidQuestions,

    #[error("Invalid session state: {0}")]
    InvalidState(#[from] crate::models::session::TransitionError),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::Extraction(_)
            | Error::Validation(_)
            | Error::Json(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidState(_) => StatusCode::CONFLICT,
            Error::Generation(_) | Error::NoValidQuestions | Error::Reqwest(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short text for the HTML form flow, where raw error details are not shown.
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest(msg) => msg.clone(),
            Error::Validation(_) | Error::Multipart(_) | Error::Json(_) => {
                "Please check the submitted form and try again.".to_string()
            }
            Error::Extraction(_) => {
                "Error: Could not extract text from the uploaded file. Please try again.".to_string()
            }
            Error::Generation(_) | Error::Reqwest(_) => {
                "Failed to generate MCQs. Please try again.".to_string()
            }
            Error::NoValidQuestions => {
                "No valid questions could be generated. Please try again.".to_string()
            }
            Error::InvalidState(_) => {
                "The quiz was reset or replaced while it was being generated. Please start again.".to_string()
            }
            Error::NotFound(_) => "File not found".to_string(),
            _ => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match self {
            Error::Reqwest(err) => format!("External service error: {}", err),
            Error::Config(_) | Error::Io(_) | Error::Internal(_) | Error::Anyhow(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Extraction(format!("Invalid DOCX archive: {}", err))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Extraction(format!("Invalid DOCX document: {}", err))
    }
}
