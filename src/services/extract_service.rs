use crate::error::{Error, Result};
use crate::utils::filename::extension;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn from_filename(name: &str) -> Option<Self> {
        match extension(name)?.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }

    /// Cheap magic-number check before the file is stored.
    pub fn matches_content(&self, data: &[u8]) -> bool {
        match self {
            DocumentKind::Pdf => data.starts_with(b"%PDF"),
            DocumentKind::Docx => data.starts_with(b"PK"),
            DocumentKind::Txt => true,
        }
    }
}

pub async fn extract_text_from_file(file_path: &Path) -> Result<String> {
    let name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let kind = DocumentKind::from_filename(name)
        .ok_or_else(|| Error::Extraction(format!("Unsupported file type: {}", name)))?;

    let data = fs::read(file_path).await?;
    let text = match kind {
        DocumentKind::Txt => String::from_utf8(data)
            .map_err(|_| Error::Extraction("Text file is not valid UTF-8".to_string()))?,
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || extract_pdf(&data))
            .await
            .map_err(|e| Error::Internal(e.to_string()))??,
        DocumentKind::Docx => tokio::task::spawn_blocking(move || extract_docx(&data))
            .await
            .map_err(|e| Error::Internal(e.to_string()))??,
    };

    if text.trim().is_empty() {
        tracing::warn!("No text could be extracted from {}", file_path.display());
        return Err(Error::Extraction("The document contains no readable text".to_string()));
    }

    tracing::info!("Extracted {} characters from {}", text.len(), file_path.display());
    Ok(text)
}

pub fn extract_pdf(data: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| {
        tracing::error!("pdf-extract failed: {}", e);
        Error::Extraction(format!("Could not read PDF: {}", e))
    })
}

/// Paragraph text from `word/document.xml`, one paragraph per line.
pub fn extract_docx(data: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Extraction(format!("Could not read DOCX body: {}", e)))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("word/document.xml", FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("extract-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Cells &amp; tissues</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Mitochondria </w:t></w:r><w:r><w:t>produce ATP.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
        let text = extract_docx(&docx_bytes(xml)).unwrap();
        assert_eq!(text, "Cells & tissues\nMitochondria produce ATP.\n");
    }

    #[test]
    fn non_zip_docx_is_an_extraction_error() {
        let err = extract_docx(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn kind_detection_checks_extension_and_magic() {
        assert_eq!(DocumentKind::from_filename("a.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("a.doc"), None);
        assert!(DocumentKind::Pdf.matches_content(b"%PDF-1.7"));
        assert!(!DocumentKind::Pdf.matches_content(b"PK\x03\x04"));
        assert!(DocumentKind::Docx.matches_content(b"PK\x03\x04"));
    }

    #[tokio::test]
    async fn txt_files_are_read_verbatim() {
        let dir = temp_dir();
        let path = dir.join("notes.txt");
        std::fs::write(&path, "Photosynthesis converts light to energy.").unwrap();
        let text = extract_text_from_file(&path).await.unwrap();
        assert_eq!(text, "Photosynthesis converts light to energy.");
    }

    #[tokio::test]
    async fn blank_documents_are_rejected() {
        let dir = temp_dir();
        let path = dir.join("blank.txt");
        std::fs::write(&path, "  \n\n ").unwrap();
        let err = extract_text_from_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let dir = temp_dir();
        let path = dir.join("slides.pptx");
        std::fs::write(&path, "PK").unwrap();
        assert!(matches!(
            extract_text_from_file(&path).await.unwrap_err(),
            Error::Extraction(_)
        ));
    }
}
