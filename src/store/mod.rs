//! store
//!
//! Live metadata bound to one document.
//!
//! # Architecture
//!
//! [`LiveMetadata`] owns the parsed mapping, a snapshot of the document body
//! and the [`Document`] handle. Every effective mutation regenerates the
//! metadata block, prefixes it to the body snapshot and writes the whole
//! text back through the handle. The body is never touched by mutations.
//!
//! # Lifecycle
//!
//! 1. [`LiveMetadata::load`] reads the text, splits and parses it, and
//!    installs the parsed entries while uninitialized (no writes).
//! 2. The store flips to initialized once every entry is installed.
//! 3. From then on [`set`](LiveMetadata::set) and
//!    [`delete`](LiveMetadata::delete) persist on every change.
//! 4. [`reload`](LiveMetadata::reload) re-reads the document when the host
//!    reports an external change.
//!
//! # Failure Semantics
//!
//! A failed write surfaces as [`StoreError::Persistence`]. The in-memory
//! mapping has already changed at that point and is not rolled back;
//! [`needs_persist`](LiveMetadata::needs_persist) reports the divergence and
//! [`persist`](LiveMetadata::persist) retries the write directly. Retrying
//! through `set` would not work because `set` skips unchanged values.
//!
//! # Concurrency
//!
//! Mutations take `&mut self`, so one store cannot run two of them at once.
//! Share a store across tasks with [`SharedMetadata`], whose mutex queues
//! mutations one at a time.
//!
//! # Example
//!
//! ```
//! use frontmeta::document::mock::MockDocument;
//! use frontmeta::store::LiveMetadata;
//!
//! # tokio_test::block_on(async {
//! let doc = MockDocument::new("note.md", "---\ntitle: Draft\n---\nBody\n");
//! let mut meta = LiveMetadata::load(doc.clone()).await.unwrap();
//!
//! meta.set("title", "Final").await.unwrap().set("status", "done").await.unwrap();
//! assert_eq!(doc.text(), "---\ntitle: Final\nstatus: done\n---\nBody\n");
//!
//! assert!(meta.delete("status").await.unwrap());
//! assert_eq!(doc.text(), "---\ntitle: Final\n---\nBody\n");
//! # });
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::core::frontmatter::{self, EntryError, ListStyle};
use crate::core::types::{MetaValue, Metadata};
use crate::document::{Document, DocumentError};

/// Errors from live metadata operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read.
    #[error("failed to load metadata")]
    Load(#[source] DocumentError),

    /// The document could not be written; memory and document now differ.
    #[error("failed to persist metadata for '{identity}'")]
    Persistence {
        /// Identity of the document
        identity: String,
        /// Underlying document error
        #[source]
        source: DocumentError,
    },

    /// The entry cannot be written without corrupting the document.
    #[error("invalid metadata entry")]
    InvalidEntry(#[from] EntryError),
}

/// Options controlling how a store writes its document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// How list values are serialized
    pub list_style: ListStyle,
}

/// A live store shared between tasks.
pub type SharedMetadata<D> = Arc<Mutex<LiveMetadata<D>>>;

/// Front-matter metadata kept in sync with its document.
#[derive(Debug)]
pub struct LiveMetadata<D: Document> {
    document: D,
    metadata: Metadata,
    body: String,
    options: StoreOptions,
    initialized: bool,
    dirty: bool,
}

/// Split and parse document text into a mapping and an owned body.
fn decode(text: &str) -> (Metadata, String) {
    let parts = frontmatter::split(text);
    (frontmatter::parse(parts.metadata), parts.body.to_string())
}

impl<D: Document> LiveMetadata<D> {
    /// Load the metadata of a document with default options.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the document cannot be read.
    pub async fn load(document: D) -> Result<Self, StoreError> {
        Self::load_with(document, StoreOptions::default()).await
    }

    /// Load the metadata of a document.
    ///
    /// Parsed entries are installed through [`set`](Self::set) before the
    /// store is initialized, so loading never writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the document cannot be read.
    pub async fn load_with(document: D, options: StoreOptions) -> Result<Self, StoreError> {
        let text = document.read_text().await.map_err(StoreError::Load)?;
        let (parsed, body) = decode(&text);

        let mut store = Self {
            document,
            metadata: Metadata::new(),
            body,
            options,
            initialized: false,
            dirty: false,
        };

        for (key, value) in parsed {
            store.set(key, value).await?;
        }
        store.initialized = true;

        log::debug!(
            "[STORE] loaded {} keys from {}",
            store.metadata.len(),
            store.document.identity()
        );
        Ok(store)
    }

    /// Get the value for a key. `None` means the key is absent.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Set a value and persist the document.
    ///
    /// Does nothing, and performs no I/O, when the value equals the current
    /// one. Returns the store to allow chaining.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidEntry`] if the key or value cannot be written
    ///   back (empty key, `:` or a line break in the key, a line break in
    ///   the value). Nothing changes in memory or on disk.
    /// - [`StoreError::Persistence`] if the write fails. The new value stays
    ///   in memory.
    pub async fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Result<&mut Self, StoreError> {
        let key = key.into();
        let value = value.into();

        if self.metadata.get(&key) == Some(&value) {
            return Ok(self);
        }
        // Parsed entries always read back; only caller input needs checking.
        if self.initialized {
            frontmatter::check_entry(&key, &value)?;
        }

        self.metadata.insert(key, value);
        if self.initialized {
            self.dirty = true;
            self.persist().await?;
        }
        Ok(self)
    }

    /// Remove a key and persist the document.
    ///
    /// Returns whether the key existed. Nothing is written when it did not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write fails. The key stays
    /// removed in memory.
    pub async fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        if self.metadata.remove(key).is_none() {
            return Ok(false);
        }

        if self.initialized {
            self.dirty = true;
            self.persist().await?;
        }
        Ok(true)
    }

    /// Write the current state to the document unconditionally.
    ///
    /// This is the retry path after a [`StoreError::Persistence`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] if the write fails.
    pub async fn persist(&mut self) -> Result<(), StoreError> {
        let text = self.render();
        match self.document.write_text(&text).await {
            Ok(()) => {
                self.dirty = false;
                log::debug!("[STORE] persisted {}", self.document.identity());
                Ok(())
            }
            Err(source) => {
                self.dirty = true;
                log::warn!(
                    "[STORE] failed to persist {}: {}",
                    self.document.identity(),
                    source
                );
                Err(StoreError::Persistence {
                    identity: self.document.identity().to_string(),
                    source,
                })
            }
        }
    }

    /// Re-read the document, replacing the mapping and the body snapshot.
    ///
    /// Call this when the host observes an external change. Never writes.
    /// Unpersisted changes are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the document cannot be read; the
    /// store keeps its previous state in that case.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        let text = self.document.read_text().await.map_err(StoreError::Load)?;
        let (metadata, body) = decode(&text);
        if self.dirty {
            log::warn!(
                "[STORE] reloading {} discards unpersisted changes",
                self.document.identity()
            );
        }
        self.metadata = metadata;
        self.body = body;
        self.dirty = false;
        log::debug!("[STORE] reloaded {}", self.document.identity());
        Ok(())
    }

    /// The full document text the store would write.
    pub fn render(&self) -> String {
        frontmatter::assemble(
            &frontmatter::serialize(&self.metadata, self.options.list_style),
            &self.body,
        )
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metadata.keys()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.metadata.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Check if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Read-only view of the mapping.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The body snapshot.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The document handle.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Identity of the document.
    pub fn identity(&self) -> &str {
        self.document.identity()
    }

    /// The options the store writes with.
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Whether loading has finished.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether memory holds changes the document does not.
    pub fn needs_persist(&self) -> bool {
        self.dirty
    }

    /// Wrap the store for sharing between tasks.
    pub fn into_shared(self) -> SharedMetadata<D> {
        Arc::new(Mutex::new(self))
    }
}
