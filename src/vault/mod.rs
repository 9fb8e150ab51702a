//! vault
//!
//! Lookup API: live metadata for documents under a root directory.
//!
//! # Design
//!
//! A [`Vault`] maps root-relative paths to [`FsDocument`]s and hands out
//! loaded [`LiveMetadata`] stores. Absence is not an error: looking up a
//! path with no document behind it returns `Ok(None)`.
//!
//! Paths are resolved lexically. A path that climbs out of the root (for
//! example `../secrets.md`) is rejected before anything is read.
//!
//! # Example
//!
//! ```no_run
//! use frontmeta::vault::Vault;
//!
//! # tokio_test::block_on(async {
//! let vault = Vault::open("/home/me/notes");
//! if let Some(mut meta) = vault.metadata_by_path("daily/today.md").await.unwrap() {
//!     meta.set("reviewed", "yes").await.unwrap();
//! }
//! # });
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::config::{Config, ConfigError, DEFAULT_EXTENSIONS};
use crate::document::{Document, DocumentError, FsDocument};
use crate::store::{LiveMetadata, StoreError, StoreOptions};

/// Errors from vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The path resolves outside the vault root.
    #[error("path is outside the vault root: {0}")]
    OutsideRoot(PathBuf),

    /// File system error while inspecting the vault.
    #[error("I/O error at '{path}'")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// Loading or persisting a store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A directory of documents.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    extensions: Vec<String>,
    options: StoreOptions,
}

impl Vault {
    /// Open a vault at `root` with default settings.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            options: StoreOptions::default(),
        }
    }

    /// Open a vault using loaded configuration.
    ///
    /// The root is `root_override`, else the configured root, else the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the current directory is needed but
    /// cannot be determined.
    pub fn from_config(config: &Config, root_override: Option<&Path>) -> Result<Self, VaultError> {
        let root = match root_override.or(config.root()) {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir().map_err(|e| VaultError::Io {
                path: PathBuf::from("."),
                source: e,
            })?,
        };

        Ok(Self {
            root,
            extensions: config.extensions(),
            options: StoreOptions {
                list_style: config.list_style(),
            },
        })
    }

    /// Replace the store options.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the document extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// The vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The document extensions.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// The options handed to every store.
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Resolve a path to a root-relative path without `.` or `..`.
    ///
    /// Absolute paths are accepted when they lie inside the root.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::OutsideRoot`] if the path escapes the root.
    pub fn relative(&self, path: &Path) -> Result<PathBuf, VaultError> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.root)
                .map_err(|_| VaultError::OutsideRoot(path.to_path_buf()))?
        } else {
            path
        };

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => relative.push(part),
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(VaultError::OutsideRoot(path.to_path_buf()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(VaultError::OutsideRoot(path.to_path_buf()))
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(VaultError::OutsideRoot(path.to_path_buf()));
        }
        Ok(relative)
    }

    /// Get a document handle for a path.
    ///
    /// The identity is the root-relative path with `/` separators.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::OutsideRoot`] if the path escapes the root.
    pub fn document(&self, path: impl AsRef<Path>) -> Result<FsDocument, VaultError> {
        let relative = self.relative(path.as_ref())?;
        Ok(FsDocument::with_identity(
            self.root.join(&relative),
            identity_for(&relative),
        ))
    }

    /// Load live metadata for the document at `path`.
    ///
    /// Returns `Ok(None)` if no file exists at the path.
    ///
    /// # Errors
    ///
    /// - [`VaultError::OutsideRoot`] if the path escapes the root
    /// - [`VaultError::Store`] if the file exists but cannot be read
    pub async fn metadata_by_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<LiveMetadata<FsDocument>>, VaultError> {
        let document = self.document(path)?;

        match tokio::fs::metadata(document.path()).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(VaultError::Io {
                    path: document.path().to_path_buf(),
                    source: e,
                })
            }
        }

        self.metadata_by_document(Some(document)).await
    }

    /// Load live metadata for a document handle the caller already holds.
    ///
    /// Returns `Ok(None)` when there is no handle or the document does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Store`] if the document cannot be read.
    pub async fn metadata_by_document<D: Document>(
        &self,
        document: Option<D>,
    ) -> Result<Option<LiveMetadata<D>>, VaultError> {
        let Some(document) = document else {
            return Ok(None);
        };

        match LiveMetadata::load_with(document, self.options).await {
            Ok(store) => Ok(Some(store)),
            Err(StoreError::Load(DocumentError::NotFound(identity))) => {
                log::debug!("[VAULT] no document at {}", identity);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List documents under the root, as sorted root-relative paths.
    ///
    /// Hidden files and directories (leading `.`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if a directory cannot be read.
    pub async fn list_documents(&self) -> Result<Vec<PathBuf>, VaultError> {
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let io_err = |e| VaultError::Io {
                path: dir.clone(),
                source: e,
            };
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_err)?;
            while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
                let path = entry.path();
                let hidden = path
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(false);
                if hidden {
                    continue;
                }

                let file_type = entry.file_type().await.map_err(io_err)?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && self.has_document_extension(&path) {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        found.push(relative.to_path_buf());
                    }
                }
            }
        }

        found.sort();
        Ok(found)
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

/// Root-relative identity with `/` separators on every platform.
fn identity_for(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
