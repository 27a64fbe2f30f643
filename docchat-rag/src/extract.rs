//! Text extraction from uploaded source files.
//!
//! Extraction is a collaborator seam: the pipeline consumes the
//! [`TextExtractor`] contract and does not care how text is produced.
//! [`FileTextExtractor`] is the bundled implementation for plain-text
//! sources; format-specific extractors (PDF and friends) plug in behind the
//! same trait.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{RagError, Result};

/// Default maximum size accepted for a plain-text source, in bytes.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Extracts plain text from a source file.
///
/// Returning an empty string signals "no extractable content" (unsupported
/// format or an empty file); the pipeline reports that to the user rather
/// than treating it as a fault. Errors are reserved for I/O failures.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of the file at `path`.
    async fn extract_text(&self, path: &Path) -> Result<String>;
}

/// A [`TextExtractor`] for plain-text files on the local filesystem.
///
/// Dispatches on the file extension: `.txt`, `.md`, and `.markdown` are read
/// verbatim (capped at [`DEFAULT_MAX_FILE_BYTES`]); anything else yields an
/// empty string.
#[derive(Debug, Clone)]
pub struct FileTextExtractor {
    max_bytes: u64,
}

impl Default for FileTextExtractor {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_FILE_BYTES }
    }
}

impl FileTextExtractor {
    /// Create an extractor with the default size cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the maximum accepted file size in bytes.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn map_err(path: &Path, e: std::io::Error) -> RagError {
        RagError::ExtractionError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" | "markdown" => {
                let metadata = tokio::fs::metadata(path)
                    .await
                    .map_err(|e| Self::map_err(path, e))?;
                if metadata.len() > self.max_bytes {
                    return Err(RagError::ExtractionError {
                        path: path.display().to_string(),
                        message: format!(
                            "file is {} bytes, larger than the {} byte limit",
                            metadata.len(),
                            self.max_bytes
                        ),
                    });
                }

                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Self::map_err(path, e))?;
                debug!(path = %path.display(), bytes = text.len(), "extracted plain text");
                Ok(text)
            }
            _ => {
                debug!(path = %path.display(), %extension, "unsupported format, no text extracted");
                Ok(String::new())
            }
        }
    }
}
