//! document::fs_document
//!
//! File-backed documents.
//!
//! - Text is read and written as UTF-8
//! - Writes are atomic (write to a hidden temp file, then rename)
//! - Every write uses its own temp file, removed again if the write fails
//!
//! # Example
//!
//! ```ignore
//! use frontmeta::document::{Document, FsDocument};
//!
//! let doc = FsDocument::new("/notes/today.md");
//! let text = doc.read_text().await?;
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::traits::{Document, DocumentError};

/// Distinguishes temp files of concurrent writes within one process.
static WRITE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A document stored in a file.
#[derive(Debug, Clone)]
pub struct FsDocument {
    /// Path to the file
    path: PathBuf,
    /// Identity reported to callers (defaults to the path)
    identity: String,
}

impl FsDocument {
    /// Create a document handle for a file path.
    ///
    /// The file does not need to exist yet; reads report
    /// [`DocumentError::NotFound`] until it does.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identity = path.display().to_string();
        Self { path, identity }
    }

    /// Create a document handle with an explicit identity.
    ///
    /// Vaults use this to report root-relative paths.
    pub fn with_identity(path: impl Into<PathBuf>, identity: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            identity: identity.into(),
        }
    }

    /// Get the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hidden sibling used for one atomic write.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let seq = WRITE_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(
            ".{}.{}-{}.fmeta-tmp",
            name,
            std::process::id(),
            seq
        ))
    }

    /// Write `text` to `temp_path` and rename it over the document.
    async fn write_via(&self, temp_path: &Path, text: &str) -> Result<(), DocumentError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| self.write_error("cannot create temp file", e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| self.write_error("cannot write content", e))?;
        file.sync_all()
            .await
            .map_err(|e| self.write_error("cannot sync to disk", e))?;
        drop(file);

        fs::rename(temp_path, &self.path)
            .await
            .map_err(|e| self.write_error("cannot rename temp file", e))
    }

    fn write_error(&self, context: &str, e: io::Error) -> DocumentError {
        DocumentError::Write {
            identity: self.identity.clone(),
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl Document for FsDocument {
    fn identity(&self) -> &str {
        &self.identity
    }

    async fn read_text(&self) -> Result<String, DocumentError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DocumentError::NotFound(self.identity.clone()))
            }
            Err(e) => {
                return Err(DocumentError::Read {
                    identity: self.identity.clone(),
                    message: e.to_string(),
                })
            }
        };

        String::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8(self.identity.clone()))
    }

    async fn write_text(&self, text: &str) -> Result<(), DocumentError> {
        let temp_path = self.temp_path();

        if let Err(e) = self.write_via(&temp_path, text).await {
            // Best effort; the write error is the one worth reporting.
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        log::debug!("[DOCUMENT] wrote {} bytes to {}", text.len(), self.identity);
        Ok(())
    }
}
