//! cli::commands::list
//!
//! List documents under the vault root.

use super::open_vault;
use crate::cli::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Print every document path under the vault root, one per line.
pub async fn list(ctx: &Context) -> Result<()> {
    let vault = open_vault(ctx)?;
    let documents = vault
        .list_documents()
        .await
        .with_context(|| format!("failed to list {}", vault.root().display()))?;

    output::debug(
        format!("{} document(s) under {}", documents.len(), vault.root().display()),
        ctx.verbosity,
    );
    for path in documents {
        println!("{}", path.display());
    }
    Ok(())
}
