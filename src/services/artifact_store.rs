use crate::error::{Error, Result};
use crate::utils::{filename::secure_filename, time};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Results,
    StudyNotes,
}

impl ArtifactKind {
    fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Results => "results",
            ArtifactKind::StudyNotes => "study_notes",
        }
    }
}

/// Rendered PDFs on disk. Every save writes a fresh timestamped file.
#[derive(Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn save(&self, kind: ArtifactKind, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.dir).await?;
        let filename = format!("{}_{}.pdf", kind.prefix(), time::file_timestamp(time::now()));
        let path = self.dir.join(&filename);
        fs::write(&path, bytes).await?;
        tracing::info!("Stored {} ({} bytes)", path.display(), bytes.len());
        Ok(filename)
    }

    /// Only plain names that survive sanitizing unchanged are looked up.
    pub async fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty() || secure_filename(filename) != filename {
            return Err(Error::NotFound("File not found".into()));
        }
        let path = self.dir.join(filename);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(Error::NotFound("File not found".into())),
        }
    }
}
