//! cli::commands::get
//!
//! Print the value of one metadata key.
//!
//! Scalars print as-is, lists print one item per line, and an empty value
//! prints nothing. A missing key is an error so scripts can tell it apart
//! from an empty value.

use super::{load_document, open_vault};
use crate::cli::Context;
use crate::core::types::MetaValue;
use crate::ui::output;
use anyhow::{bail, Result};
use std::path::Path;

/// Print the value of `key` in the document at `path`.
pub async fn get(ctx: &Context, path: &Path, key: &str) -> Result<()> {
    let vault = open_vault(ctx)?;
    let meta = load_document(&vault, path).await?;

    match meta.get(key) {
        None => bail!("key '{}' not found in {}", key, meta.identity()),
        Some(MetaValue::Null) => {}
        Some(MetaValue::Scalar(value)) => println!("{}", value),
        Some(MetaValue::List(items)) => {
            if !items.is_empty() {
                println!("{}", output::format_list(items, ""));
            }
        }
    }

    Ok(())
}
