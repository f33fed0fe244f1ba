use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub reset: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReasoningRequest {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "correct_answer must not be empty"))]
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReasoningResponse {
    pub reasoning: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotesResponse {
    pub status: String,
    pub notes_path: String,
}

/// Error body of the JSON endpoints; `status` is always `"error"`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
        }
    }
}

/// Fields of the `/generate` multipart form after they have been read.
#[derive(Debug, Default)]
pub struct GenerateForm {
    pub topic: Option<String>,
    pub file: Option<(String, bytes::Bytes)>,
    pub num_questions: Option<String>,
    pub difficulty: Option<String>,
}
