use crate::error::{Error, Result};
use crate::models::question::QuizSource;
use crate::services::extract_service::{self, DocumentKind, ALLOWED_EXTENSIONS};
use crate::utils::filename::secure_filename;
use std::path::PathBuf;
use tokio::fs;

#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// Checks the file type before anything touches the disk.
    pub fn validate(filename: &str, data: &[u8]) -> Result<(String, DocumentKind)> {
        let safe_name = secure_filename(filename);
        if safe_name.is_empty() {
            return Err(Error::BadRequest("Invalid file name".into()));
        }

        let kind = DocumentKind::from_filename(&safe_name).ok_or_else(|| {
            Error::BadRequest(format!(
                "Unsupported file type. Allowed types: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        if !kind.matches_content(data) {
            return Err(Error::BadRequest(format!(
                "File content does not match its .{} extension",
                safe_name.rsplit('.').next().unwrap_or_default()
            )));
        }

        Ok((safe_name, kind))
    }

    /// Stores the upload under its sanitized name and extracts its text.
    pub async fn save_and_extract(&self, filename: &str, data: &[u8]) -> Result<QuizSource> {
        let (safe_name, _) = Self::validate(filename, data)?;

        fs::create_dir_all(&self.upload_dir).await?;
        let file_path = self.upload_dir.join(&safe_name);
        fs::write(&file_path, data).await.map_err(|e| {
            tracing::error!("Failed to write upload {}: {}", file_path.display(), e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;
        tracing::info!("Saved upload to {}", file_path.display());

        let content = extract_service::extract_text_from_file(&file_path).await?;
        Ok(QuizSource::File {
            filename: safe_name,
            content,
        })
    }
}
