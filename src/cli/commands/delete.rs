//! cli::commands::delete
//!
//! Remove a metadata key and write the document.

use super::{load_document, open_vault};
use crate::cli::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Remove `key` from the document at `path`.
///
/// Removing a key that is not present is not an error; the document is
/// left untouched and a warning is printed.
pub async fn delete(ctx: &Context, path: &Path, key: &str) -> Result<()> {
    let vault = open_vault(ctx)?;
    let mut meta = load_document(&vault, path).await?;

    let removed = meta
        .delete(key)
        .await
        .with_context(|| format!("failed to update {}", path.display()))?;

    if removed {
        output::success(
            format!("Removed '{}' from {}", key, meta.identity()),
            ctx.verbosity,
        );
    } else {
        output::warn(
            format!("key '{}' not present in {}", key, meta.identity()),
            ctx.verbosity,
        );
    }
    Ok(())
}
