//! Integration tests for live metadata over real files.
//!
//! These tests exercise the vault lookup, the store, and the file-backed
//! document together against temporary directories.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use frontmeta::core::frontmatter::ListStyle;
use frontmeta::core::types::MetaValue;
use frontmeta::document::mock::{FailOn, MockDocument};
use frontmeta::document::{DocumentError, FsDocument};
use frontmeta::store::{LiveMetadata, StoreError, StoreOptions};
use frontmeta::vault::{Vault, VaultError};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A vault in a temporary directory.
struct TestVault {
    dir: TempDir,
    vault: Vault,
}

impl TestVault {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let vault = Vault::open(dir.path());
        Self { dir, vault }
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn loading_does_not_rewrite_non_canonical_text() {
    let vault = TestVault::new();
    let original = "---\ntitle:Draft\ntags: a,b\n---\n\nBody\n";
    vault.write("note.md", original);

    let meta = vault
        .vault
        .metadata_by_path("note.md")
        .await
        .unwrap()
        .expect("document exists");

    assert_eq!(meta.get("title"), Some(&MetaValue::scalar("Draft")));
    assert_eq!(meta.get("tags"), Some(&MetaValue::scalar("a,b")));
    assert_eq!(vault.read("note.md"), original);
}

#[tokio::test]
async fn loading_counts_no_writes() {
    let doc = MockDocument::new("a.md", "---\na: 1\nb:\n  - x\n  - y\nc: \n---\nbody");
    let meta = LiveMetadata::load(doc.clone()).await.unwrap();

    assert_eq!(meta.len(), 3);
    assert!(meta.is_initialized());
    assert_eq!(doc.write_count(), 0);
}

#[tokio::test]
async fn missing_document_is_absent() {
    let vault = TestVault::new();
    assert!(vault
        .vault
        .metadata_by_path("nowhere.md")
        .await
        .unwrap()
        .is_none());
    assert!(vault
        .vault
        .metadata_by_document::<FsDocument>(None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn escaping_the_root_is_rejected() {
    let vault = TestVault::new();
    let err = vault
        .vault
        .metadata_by_path("../outside.md")
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::OutsideRoot(_)));
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn set_and_delete_persist_in_order() {
    let vault = TestVault::new();
    vault.write("daily/today.md", "---\ntitle: Today\nstatus: new\n---\n# Today\n\nNotes.\n");

    let mut meta = vault
        .vault
        .metadata_by_path("daily/today.md")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(meta.identity(), "daily/today.md");

    meta.set("status", "done").await.unwrap();
    meta.set("tags", vec!["work", "urgent"]).await.unwrap();
    assert_eq!(
        vault.read("daily/today.md"),
        "---\ntitle: Today\nstatus: done\ntags:\n  - work\n  - urgent\n---\n# Today\n\nNotes.\n"
    );

    assert!(meta.delete("title").await.unwrap());
    assert!(!meta.delete("title").await.unwrap());
    assert_eq!(
        vault.read("daily/today.md"),
        "---\nstatus: done\ntags:\n  - work\n  - urgent\n---\n# Today\n\nNotes.\n"
    );
}

#[tokio::test]
async fn delete_then_get_is_absent() {
    let vault = TestVault::new();
    vault.write("a.md", "---\nk: v\n---\n");

    let mut meta = vault.vault.metadata_by_path("a.md").await.unwrap().unwrap();
    meta.delete("k").await.unwrap();
    assert_eq!(meta.get("k"), None);

    let reloaded = vault.vault.metadata_by_path("a.md").await.unwrap().unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(vault.read("a.md"), "---\n\n---\n");
}

#[tokio::test]
async fn document_without_block_gains_one() {
    let vault = TestVault::new();
    vault.write("plain.md", "Just text.\n");

    let mut meta = vault.vault.metadata_by_path("plain.md").await.unwrap().unwrap();
    assert!(meta.is_empty());

    meta.set("status", "new").await.unwrap();
    assert_eq!(vault.read("plain.md"), "---\nstatus: new\n---\nJust text.\n");
}

#[tokio::test]
async fn inline_style_from_vault_options() {
    let vault = TestVault::new();
    vault.write("a.md", "---\ntags:\n  - x\n---\nbody");

    let inline = vault.vault.clone().with_options(StoreOptions {
        list_style: ListStyle::Inline,
    });
    let mut meta = inline.metadata_by_path("a.md").await.unwrap().unwrap();
    meta.set("tags", vec!["x", "y"]).await.unwrap();

    assert_eq!(vault.read("a.md"), "---\ntags: x,y\n---\nbody");
}

#[tokio::test]
async fn equal_value_skips_write() {
    let doc = MockDocument::new("a.md", "---\nstatus: done\n---\n");
    let mut meta = LiveMetadata::load(doc.clone()).await.unwrap();

    meta.set("status", "done").await.unwrap();
    assert_eq!(doc.write_count(), 0);
}

// =============================================================================
// Failures and external changes
// =============================================================================

#[tokio::test]
async fn failed_write_can_be_retried() {
    let doc = MockDocument::new("a.md", "---\na: 1\n---\nbody");
    let mut meta = LiveMetadata::load(doc.clone()).await.unwrap();

    doc.set_fail_on(FailOn::Write(DocumentError::Write {
        identity: "a.md".into(),
        message: "read-only".into(),
    }));
    let err = meta.set("a", "2").await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
    assert_eq!(meta.get("a"), Some(&MetaValue::scalar("2")));
    assert!(meta.needs_persist());
    assert_eq!(doc.text(), "---\na: 1\n---\nbody");

    doc.clear_fail_on();
    meta.persist().await.unwrap();
    assert!(!meta.needs_persist());
    assert_eq!(doc.text(), "---\na: 2\n---\nbody");
}

#[tokio::test]
async fn reload_picks_up_external_edit() {
    let vault = TestVault::new();
    vault.write("a.md", "---\na: 1\n---\nold body\n");
    let mut meta = vault.vault.metadata_by_path("a.md").await.unwrap().unwrap();

    vault.write("a.md", "---\nb: 2\n---\nnew body\n");
    meta.reload().await.unwrap();
    assert_eq!(meta.get("a"), None);
    assert_eq!(meta.get("b"), Some(&MetaValue::scalar("2")));

    meta.set("c", "3").await.unwrap();
    assert_eq!(vault.read("a.md"), "---\nb: 2\nc: 3\n---\nnew body\n");
}

#[tokio::test]
async fn shared_store_serializes_mutations() {
    let vault = TestVault::new();
    vault.write("a.md", "---\n---\n");
    let shared = vault
        .vault
        .metadata_by_path("a.md")
        .await
        .unwrap()
        .unwrap()
        .into_shared();

    let mut handles = Vec::new();
    for i in 0..8 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            let mut guard = shared.lock().await;
            guard.set(format!("k{}", i), i.to_string()).await?;
            Ok::<(), StoreError>(())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let reloaded = vault.vault.metadata_by_path("a.md").await.unwrap().unwrap();
    assert_eq!(reloaded.len(), 8);
    assert!(vault.path().join("a.md").exists());
}
