//! document::traits
//!
//! Document capability trait definition.
//!
//! # Design
//!
//! A `Document` is the host's handle to one text document. The core only
//! ever reads the full text and replaces the full text; how the host stores
//! it (file, buffer, database row) is its own business.
//!
//! The trait is async because reads and writes are the only suspension
//! points of the live store.
//!
//! # Example
//!
//! ```ignore
//! use frontmeta::document::{Document, DocumentError};
//!
//! async fn touch(doc: &dyn Document) -> Result<(), DocumentError> {
//!     let text = doc.read_text().await?;
//!     doc.write_text(&text).await
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// No document exists at the given identity.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Failed to read the document.
    #[error("failed to read document '{identity}': {message}")]
    Read {
        /// Identity of the document
        identity: String,
        /// Underlying error message
        message: String,
    },

    /// Failed to write the document.
    #[error("failed to write document '{identity}': {message}")]
    Write {
        /// Identity of the document
        identity: String,
        /// Underlying error message
        message: String,
    },

    /// The document is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Host capability for one text document.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so stores can move across tasks.
///
/// # Atomicity
///
/// `write_text` replaces the whole content. Implementations report success
/// or failure; whether the replacement is atomic on disk is up to them.
#[async_trait]
pub trait Document: Send + Sync {
    /// Stable path-like identity, usable as a lookup key.
    fn identity(&self) -> &str;

    /// Read the full current text.
    async fn read_text(&self) -> Result<String, DocumentError>;

    /// Replace the full text.
    async fn write_text(&self, text: &str) -> Result<(), DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocumentError::NotFound("notes/a.md".into());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("notes/a.md"));

        let err = DocumentError::Read {
            identity: "a.md".into(),
            message: "permission denied".into(),
        };
        assert!(err.to_string().contains("read"));
        assert!(err.to_string().contains("permission denied"));

        let err = DocumentError::Write {
            identity: "a.md".into(),
            message: "disk full".into(),
        };
        assert!(err.to_string().contains("write"));
        assert!(err.to_string().contains("a.md"));

        let err = DocumentError::InvalidUtf8("a.md".into());
        assert!(err.to_string().contains("UTF-8"));
    }
}
