pub mod ai_service;
pub mod artifact_store;
pub mod extract_service;
pub mod grading_service;
pub mod mcq_parser;
pub mod prompts;
pub mod quiz_service;
pub mod render_service;
pub mod session_store;
pub mod upload_service;
