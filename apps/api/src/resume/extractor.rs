//! Resume-text collaborator boundary: file path → raw text.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("file is not valid UTF-8 text")]
    NotUtf8,

    #[error("no extractable text in file")]
    Empty,
}

pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Plain-text files (`.txt`, `.md`) are read as UTF-8; anything else is
/// parsed as PDF.
pub struct FileTextExtractor;

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let text = if is_plain_text(path) {
            let bytes = std::fs::read(path)?;
            String::from_utf8(bytes).map_err(|_| ExtractionError::NotUtf8)?
        } else {
            pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))?
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "txt" | "md"))
        .unwrap_or(false)
}

/// Runs an extraction `task` on the blocking pool. A panicking parser surfaces as an
/// extraction error.
pub async fn extract_blocking<F, T>(task: F) -> Result<T, ExtractionError>
where
    F: FnOnce() -> Result<T, ExtractionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ExtractionError::Pdf(format!("extraction task failed: {e}")))?
}

/// Shared handle stored in `AppState`.
pub type SharedExtractor = Arc<dyn TextExtractor>;
