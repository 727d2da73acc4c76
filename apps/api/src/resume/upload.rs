//! Multipart form parsing and scoped staging of uploaded résumé files.
//!
//! A staged file lives in the upload directory only as long as its
//! `StagedUpload` handle; dropping the handle deletes it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;
use crate::resume::extractor::{extract_blocking, SharedExtractor};

/// A file part received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Fields of the résumé / match forms. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct ResumeForm {
    pub resume: Option<UploadedFile>,
    pub job_description: Option<String>,
    pub location: Option<String>,
}

impl ResumeForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Malformed multipart body"))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, "Failed to read resume upload"))?;
                    form.resume = Some(UploadedFile { file_name, bytes });
                }
                "job_description" | "location" => {
                    let value = field.text().await.map_err(|e| {
                        multipart_error(e, &format!("Failed to read field '{name}'"))
                    })?;
                    let value = Some(value).filter(|v| !v.trim().is_empty());
                    if name == "location" {
                        form.location = value;
                    } else {
                        form.job_description = value;
                    }
                }
                other => debug!("Ignoring multipart field '{other}'"),
            }
        }

        Ok(form)
    }
}

/// Body-limit overruns become 413; every other multipart failure is the
/// client's malformed request.
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

/// An uploaded file written to disk. Removed when dropped.
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    pub fn stage(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let suffix = format!("-{}", sanitize_file_name(file_name));
        let mut file = tempfile::Builder::new()
            .prefix("resume")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; whitespace becomes `_`.
/// Leading dots are stripped so the result is never a hidden or relative name.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Stages `upload` under `dir`, extracts its text and releases the file.
pub async fn extract_upload(
    extractor: SharedExtractor,
    dir: PathBuf,
    upload: UploadedFile,
) -> Result<String, AppError> {
    if upload.file_name.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    // Staging failures are server faults (500); only extraction failures are 422.
    let staged = tokio::task::spawn_blocking(move || {
        StagedUpload::stage(&dir, &upload.file_name, &upload.bytes)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
    .context("Failed to stage resume upload")?;
    debug!("Staged upload at {}", staged.path().display());

    let text = extract_blocking(move || extractor.extract_text(staged.path())).await?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::response::IntoResponse;

    use crate::resume::extractor::{ExtractionError, FileTextExtractor};

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My CV (final).pdf"), "My_CV_final.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cv.txt"), "cv.txt");
        assert_eq!(sanitize_file_name("...hidden"), "hidden");
        assert_eq!(sanitize_file_name("Résumé.pdf"), "Rsum.pdf");
        assert_eq!(sanitize_file_name("%%%"), "upload");
    }

    #[test]
    fn test_staged_upload_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedUpload::stage(dir.path(), "cv.txt", b"rust kafka").unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.starts_with(dir.path()));
        assert!(path.to_string_lossy().ends_with("-cv.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"rust kafka");

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_extract_upload_reads_text_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedFile {
            file_name: "cv.txt".to_string(),
            bytes: Bytes::from_static(b"Senior Rust engineer"),
        };

        let text = extract_upload(Arc::new(FileTextExtractor), dir.path().to_path_buf(), upload)
            .await
            .unwrap();

        assert_eq!(text, "Senior Rust engineer");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_extract_upload_rejects_empty_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedFile {
            file_name: "  ".to_string(),
            bytes: Bytes::from_static(b"text"),
        };

        let err = extract_upload(Arc::new(FileTextExtractor), dir.path().to_path_buf(), upload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_extract_upload_staging_failure_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let upload = UploadedFile {
            file_name: "cv.txt".to_string(),
            bytes: Bytes::from_static(b"text"),
        };

        let err = extract_upload(Arc::new(FileTextExtractor), missing, upload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_extract_upload_unreadable_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedFile {
            file_name: "cv.txt".to_string(),
            bytes: Bytes::from_static(&[0xff, 0xfe, 0xfd]),
        };

        let err = extract_upload(Arc::new(FileTextExtractor), dir.path().to_path_buf(), upload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractionError::NotUtf8)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
