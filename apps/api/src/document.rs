//! PDF-to-text extraction via `pdf-extract`.
//!
//! Parsing is CPU-bound, so the async entry points hand the work to tokio's
//! blocking pool.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("file is not a PDF")]
    NotPdf,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text: {0}")]
    Extract(String),

    #[error("document contains no extractable text")]
    NoText,
}

/// True if the content type says PDF or the bytes carry the `%PDF-` magic.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}

/// Extracts the text of every page, in page order.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, DocumentError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(DocumentError::NotPdf);
    }

    // pdf-extract panics on some malformed inputs
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| DocumentError::Extract("PDF parser panicked".to_string()))?
        .map_err(|e| DocumentError::Extract(e.to_string()))?;

    debug!("Extracted {} chars from {} bytes", text.len(), bytes.len());
    Ok(text)
}

pub fn extract_text_from_path(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extract_text_from_bytes(&bytes)
}

pub async fn extract_text_from_upload(bytes: Bytes) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_text_from_bytes(&bytes))
        .await
        .map_err(|e| DocumentError::Extract(format!("extraction task failed: {e}")))?
}

pub async fn extract_text_from_file(path: PathBuf) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_text_from_path(&path))
        .await
        .map_err(|e| DocumentError::Extract(format!("extraction task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pdf_with_lines;

    #[test]
    fn test_is_pdf_by_content_type() {
        assert!(is_pdf(Some("Application/PDF"), b""));
        assert!(!is_pdf(Some("text/plain"), b"hello"));
    }

    #[test]
    fn test_is_pdf_by_magic_bytes() {
        assert!(is_pdf(None, b"%PDF-1.7\n..."));
        assert!(!is_pdf(None, b"PK\x03\x04"));
    }

    #[test]
    fn test_non_pdf_bytes_rejected() {
        let err = extract_text_from_bytes(b"just some text").unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf));
    }

    #[test]
    fn test_truncated_pdf_fails() {
        let err = extract_text_from_bytes(b"%PDF-1.5\n%garbage").unwrap_err();
        assert!(matches!(err, DocumentError::Extract(_)));
    }

    #[test]
    fn test_extracts_text_from_generated_pdf() {
        let pdf = pdf_with_lines(&["Jane Doe", "Senior Data Engineer"]);
        let text = extract_text_from_bytes(&pdf).unwrap();
        assert!(text.contains("Jane Doe"), "got: {text:?}");
        assert!(text.contains("Senior Data Engineer"), "got: {text:?}");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = extract_text_from_path(Path::new("/nonexistent/cv.pdf")).unwrap_err();
        match err {
            DocumentError::Read { path, .. } => assert_eq!(path, Path::new("/nonexistent/cv.pdf")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_upload_extraction_runs_off_the_runtime() {
        let pdf = pdf_with_lines(&["Budi Santoso"]);
        let text = extract_text_from_upload(Bytes::from(pdf)).await.unwrap();
        assert!(text.contains("Budi Santoso"));
    }
}
