//! Upload gate: accepts a single PDF from a multipart body, bounded in size.
//!
//! The size limit is enforced while streaming chunks, so an oversized upload
//! is rejected without ever being buffered in full.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};

use crate::errors::AppError;

/// Name of the multipart field carrying the résumé.
pub const FILE_FIELD: &str = "file";
pub const PDF_MIME: &str = "application/pdf";
/// 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Slack on top of `MAX_UPLOAD_BYTES` for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// A validated upload, owned by a single request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Reads the `file` field from `multipart`, enforcing MIME type and size.
/// Other fields are skipped.
pub async fn read_pdf_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_pdf_mime(&content_type) {
            return Err(AppError::Validation(
                "Invalid file type. Only PDF files are allowed".to_string(),
            ));
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = read_bounded(field, max_bytes).await?;

        return Ok(UploadedFile {
            bytes,
            content_type,
            file_name,
        });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

async fn read_bounded(mut field: Field<'_>, max_bytes: usize) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Compares the media type only, ignoring parameters and ASCII case.
fn is_pdf_mime(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME))
        .unwrap_or(false)
}

const MIB: usize = 1024 * 1024;

fn too_large(max_bytes: usize) -> AppError {
    AppError::Validation(format!(
        "File too large. Maximum size is {}",
        describe_limit(max_bytes)
    ))
}

/// Whole mebibytes print as "N MB"; anything else prints exact bytes.
fn describe_limit(max_bytes: usize) -> String {
    if max_bytes >= MIB && max_bytes % MIB == 0 {
        format!("{} MB", max_bytes / MIB)
    } else {
        format!("{max_bytes} bytes")
    }
}

/// Malformed or over-limit multipart bodies are the caller's fault.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(MAX_UPLOAD_BYTES)
    } else {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_mime_exact() {
        assert!(is_pdf_mime("application/pdf"));
    }

    #[test]
    fn test_pdf_mime_ignores_case_and_params() {
        assert!(is_pdf_mime("Application/PDF"));
        assert!(is_pdf_mime("application/pdf; charset=binary"));
    }

    #[test]
    fn test_non_pdf_mime_rejected() {
        assert!(!is_pdf_mime(""));
        assert!(!is_pdf_mime("text/plain"));
        assert!(!is_pdf_mime("application/pdfx"));
        assert!(!is_pdf_mime("application/octet-stream"));
    }

    #[test]
    fn test_too_large_message_names_limit() {
        match too_large(MAX_UPLOAD_BYTES) {
            AppError::Validation(msg) => assert!(msg.contains("10 MB"), "got: {msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_mebibyte_limit_prints_bytes() {
        assert_eq!(describe_limit(512 * 1024), "524288 bytes");
        assert_eq!(describe_limit(MIB + 1), "1048577 bytes");
        assert_eq!(describe_limit(2 * MIB), "2 MB");
        match too_large(100) {
            AppError::Validation(msg) => {
                assert_eq!(msg, "File too large. Maximum size is 100 bytes")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_uploaded_file_size_is_byte_len() {
        let file = UploadedFile {
            bytes: Bytes::from_static(b"%PDF-1.4"),
            content_type: PDF_MIME.to_string(),
            file_name: None,
        };
        assert_eq!(file.size(), 8);
    }
}
