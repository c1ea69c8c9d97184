//! Input manager: resolves the document format and runs extraction

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{extract_bytes, ExtractedDocument};
use log::info;
use std::path::Path;
use tokio::fs;

/// Stateless entry point for turning uploaded files into normalized text.
///
/// The format comes from the declared original filename when one is given,
/// since stored uploads may have been renamed.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn extract_file(&self, path: &Path, original_filename: Option<&str>) -> Result<ExtractedDocument> {
        let declared_name = match original_filename {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or_else(|| {
                    ScreenerError::InvalidInput(format!("Path has no file name: {}", path.display()))
                })?,
        };

        let format = DocumentFormat::from_filename(&declared_name)?;

        if !path.is_file() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        info!("Extracting text from {} document: {}", format, path.display());
        let bytes = fs::read(path).await?;

        // Parsing is CPU-bound; keep it off the async workers.
        let document = tokio::task::spawn_blocking(move || extract_bytes(format, &bytes))
            .await
            .map_err(|e| ScreenerError::Extraction(format!("Extraction task failed: {}", e)))??;

        info!(
            "Extracted {} characters from {}",
            document.normalized_text.len(),
            declared_name
        );
        Ok(document)
    }

    /// Extract an upload that is already in memory
    pub fn extract_upload(&self, bytes: &[u8], original_filename: &str) -> Result<ExtractedDocument> {
        let format = DocumentFormat::from_filename(original_filename)?;
        extract_bytes(format, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected_before_reading() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "python flask sql").unwrap();

        let err = InputManager::new().extract_file(&path, None).await.unwrap_err();
        assert!(matches!(err, ScreenerError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = InputManager::new()
            .extract_file(Path::new("does/not/exist.pdf"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ScreenerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_zero_byte_pdf_fails_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("upload.bin");
        std::fs::write(&path, b"").unwrap();

        let err = InputManager::new()
            .extract_file(&path, Some("resume.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScreenerError::Extraction(_)));
    }

    #[test]
    fn test_extract_upload_uses_declared_name() {
        let err = InputManager::new().extract_upload(b"%PDF-garbage", "resume.pdf").unwrap_err();
        assert!(matches!(err, ScreenerError::Extraction(_)));

        let err = InputManager::new().extract_upload(b"plain", "notes.md").unwrap_err();
        assert!(matches!(err, ScreenerError::UnsupportedFormat(_)));
    }
}
