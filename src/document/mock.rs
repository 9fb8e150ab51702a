//! document::mock
//!
//! In-memory document for deterministic testing.
//!
//! # Design
//!
//! The mock keeps the document text in memory, records every read and write,
//! and can be configured to fail either operation. Clones share state, so a
//! test can hand one clone to a store and inspect the other.
//!
//! # Example
//!
//! ```
//! use frontmeta::document::mock::MockDocument;
//! use frontmeta::document::Document;
//!
//! # tokio_test::block_on(async {
//! let doc = MockDocument::new("note.md", "---\na: 1\n---\nbody");
//! doc.write_text("replaced").await.unwrap();
//!
//! assert_eq!(doc.text(), "replaced");
//! assert_eq!(doc.write_count(), 1);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{Document, DocumentError};

/// Mock document for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockDocument {
    identity: Arc<str>,
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockDocumentInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockDocumentInner {
    /// Current text.
    text: String,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail read_text with the given error.
    Read(DocumentError),
    /// Fail write_text with the given error.
    Write(DocumentError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Read,
    Write { text: String },
}

impl MockDocument {
    /// Create a mock document with initial text.
    pub fn new(identity: &str, text: &str) -> Self {
        Self {
            identity: Arc::from(identity),
            inner: Arc::new(Mutex::new(MockDocumentInner {
                text: text.to_string(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use frontmeta::document::mock::{FailOn, MockDocument};
    /// use frontmeta::document::DocumentError;
    ///
    /// let doc = MockDocument::new("a.md", "").fail_on(FailOn::Write(DocumentError::Write {
    ///     identity: "a.md".into(),
    ///     message: "disk full".into(),
    /// }));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.set_fail_on(fail_on);
        self
    }

    /// Configure a failure on an existing (possibly shared) mock.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Current text.
    pub fn text(&self) -> String {
        let inner = self.inner.lock().unwrap();
        inner.text.clone()
    }

    /// Replace the text without recording an operation.
    ///
    /// Simulates an edit made outside the store.
    pub fn set_text(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.text = text.to_string();
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    /// Number of write attempts, failed ones included.
    pub fn write_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Write { .. }))
            .count()
    }
}

#[async_trait]
impl Document for MockDocument {
    fn identity(&self) -> &str {
        &self.identity
    }

    async fn read_text(&self) -> Result<String, DocumentError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Read);
        if let Some(FailOn::Read(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        Ok(inner.text.clone())
    }

    async fn write_text(&self, text: &str) -> Result<(), DocumentError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Write {
            text: text.to_string(),
        });
        if let Some(FailOn::Write(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        inner.text = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_error() -> DocumentError {
        DocumentError::Write {
            identity: "a.md".into(),
            message: "disk full".into(),
        }
    }

    #[tokio::test]
    async fn read_returns_text() {
        let doc = MockDocument::new("a.md", "hello");
        assert_eq!(doc.read_text().await.unwrap(), "hello");
        assert_eq!(doc.operations(), vec![MockOperation::Read]);
    }

    #[tokio::test]
    async fn write_updates_text_and_records() {
        let doc = MockDocument::new("a.md", "hello");
        doc.write_text("bye").await.unwrap();

        assert_eq!(doc.text(), "bye");
        assert_eq!(
            doc.operations(),
            vec![MockOperation::Write { text: "bye".into() }]
        );
    }

    #[tokio::test]
    async fn failed_write_keeps_text() {
        let doc = MockDocument::new("a.md", "hello").fail_on(FailOn::Write(write_error()));

        let err = doc.write_text("bye").await.unwrap_err();
        assert_eq!(err, write_error());
        assert_eq!(doc.text(), "hello");
        assert_eq!(doc.write_count(), 1);

        doc.clear_fail_on();
        doc.write_text("bye").await.unwrap();
        assert_eq!(doc.text(), "bye");
    }

    #[tokio::test]
    async fn failed_read() {
        let doc = MockDocument::new("a.md", "hello")
            .fail_on(FailOn::Read(DocumentError::NotFound("a.md".into())));
        assert!(matches!(
            doc.read_text().await,
            Err(DocumentError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let doc = MockDocument::new("a.md", "");
        let other = doc.clone();
        other.write_text("shared").await.unwrap();
        assert_eq!(doc.text(), "shared");
        assert_eq!(doc.identity(), "a.md");
    }

    #[test]
    fn set_text_is_not_recorded() {
        let doc = MockDocument::new("a.md", "");
        doc.set_text("external");
        assert_eq!(doc.text(), "external");
        assert!(doc.operations().is_empty());
        doc.clear_operations();
    }
}
