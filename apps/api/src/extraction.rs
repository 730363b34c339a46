//! Text extraction: turns an uploaded PDF into plain résumé text.
//!
//! The parser sits behind `TextExtractor` so handlers can be exercised with a
//! deterministic stand-in. `AppState` carries an `Arc<dyn TextExtractor>`.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::errors::AppError;
use crate::upload::UploadedFile;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document could not be parsed.
    #[error("malformed PDF: {0}")]
    Malformed(String),

    /// The extraction task itself failed (panic or cancellation).
    #[error("extraction task failed: {0}")]
    Crashed(String),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// Default extractor backed by `pdf-extract`.
///
/// Parsing is CPU-bound and runs on the blocking pool. A panic inside the
/// parser surfaces as `ExtractionError::Crashed` instead of tearing down the
/// worker.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractionError::Crashed(e.to_string()))?
        .map_err(ExtractionError::Malformed)
    }
}

/// Non-empty, trimmed text extracted from an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Returns `None` when nothing but whitespace remains.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Runs one extraction attempt and validates the result.
///
/// Parse failures and empty output are both client-correctable (400);
/// only a crashed extraction task is a server fault.
pub async fn extract_resume_text(
    extractor: &dyn TextExtractor,
    file: &UploadedFile,
) -> Result<ExtractedText, AppError> {
    let raw = extractor
        .extract_text(file.bytes.clone())
        .await
        .map_err(|e| match e {
            ExtractionError::Malformed(detail) => {
                tracing::warn!("PDF parse failed: {detail}");
                AppError::Validation(
                    "Could not read the PDF. Please upload a valid PDF file".to_string(),
                )
            }
            ExtractionError::Crashed(detail) => AppError::Extraction(detail),
        })?;

    ExtractedText::new(&raw).ok_or_else(|| {
        AppError::Validation(
            "No readable text found in PDF. Scanned or image-only PDFs are not supported"
                .to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor(fn() -> Result<String, ExtractionError>);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract_text(&self, _bytes: Bytes) -> Result<String, ExtractionError> {
            (self.0)()
        }
    }

    fn pdf(bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            bytes: Bytes::from_static(bytes),
            content_type: "application/pdf".to_string(),
            file_name: Some("resume.pdf".to_string()),
        }
    }

    #[test]
    fn test_extracted_text_is_trimmed() {
        let text = ExtractedText::new("  \n Jane Doe\nRust Engineer \t\n").unwrap();
        assert_eq!(text.as_str(), "Jane Doe\nRust Engineer");
    }

    #[test]
    fn test_whitespace_only_is_absent() {
        assert!(ExtractedText::new("").is_none());
        assert!(ExtractedText::new(" \n\t\r\n ").is_none());
    }

    #[tokio::test]
    async fn test_extract_resume_text_success() {
        let extractor = FixedExtractor(|| Ok("\n\nJane Doe — Senior Engineer\n".to_string()));
        let text = extract_resume_text(&extractor, &pdf(b"%PDF")).await.unwrap();
        assert_eq!(text.as_str(), "Jane Doe — Senior Engineer");
    }

    #[tokio::test]
    async fn test_empty_text_is_validation_error() {
        let extractor = FixedExtractor(|| Ok("   \n  ".to_string()));
        let err = extract_resume_text(&extractor, &pdf(b"%PDF")).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("No readable text")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_pdf_is_validation_error() {
        let extractor =
            FixedExtractor(|| Err(ExtractionError::Malformed("invalid file header".into())));
        let err = extract_resume_text(&extractor, &pdf(b"nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_crashed_extraction_is_server_fault() {
        let extractor = FixedExtractor(|| Err(ExtractionError::Crashed("panicked".into())));
        let err = extract_resume_text(&extractor, &pdf(b"%PDF")).await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_non_pdf_bytes() {
        let result = PdfTextExtractor
            .extract_text(Bytes::from_static(b"this is not a pdf document"))
            .await;
        assert!(result.is_err());
    }
}
