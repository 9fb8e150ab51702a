//! cli::commands::show
//!
//! Show all metadata of a document.
//!
//! Plain output is the front-matter block as it would be written. With
//! `--json` the output is an object with the document identity and the
//! metadata, keys in document order.

use super::{load_document, open_vault};
use crate::cli::Context;
use crate::core::frontmatter;
use anyhow::Result;
use serde_json::json;
use std::path::Path;

/// Show the metadata of the document at `path`.
pub async fn show(ctx: &Context, path: &Path, json: bool) -> Result<()> {
    let vault = open_vault(ctx)?;
    let meta = load_document(&vault, path).await?;

    if json {
        let value = json!({
            "identity": meta.identity(),
            "metadata": meta.metadata(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if meta.is_empty() {
        return Ok(());
    }
    println!(
        "{}",
        frontmatter::serialize(meta.metadata(), meta.options().list_style)
    );
    Ok(())
}
