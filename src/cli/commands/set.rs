//! cli::commands::set
//!
//! Set a metadata key and write the document.
//!
//! # Value shape
//!
//! | values     | `--list` | result              |
//! |------------|----------|---------------------|
//! | none       | no       | empty value         |
//! | one        | no       | scalar              |
//! | several    | any      | list                |
//! | any        | yes      | list (possibly empty) |

use super::{load_document, open_vault};
use crate::cli::Context;
use crate::core::types::MetaValue;
use crate::ui::output;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Set `key` in the document at `path`.
pub async fn set(
    ctx: &Context,
    path: &Path,
    key: &str,
    values: Vec<String>,
    list: bool,
) -> Result<()> {
    let vault = open_vault(ctx)?;
    let mut meta = load_document(&vault, path).await?;

    let value = value_from_args(values, list);
    let unchanged = meta.get(key) == Some(&value);

    meta.set(key, value)
        .await
        .with_context(|| format!("failed to update {}", path.display()))?;

    if unchanged {
        output::debug(format!("{} already has that value", key), ctx.verbosity);
    } else {
        output::success(format!("Set '{}' in {}", key, meta.identity()), ctx.verbosity);
    }
    Ok(())
}

/// Build the value from positional arguments.
pub(crate) fn value_from_args(mut values: Vec<String>, list: bool) -> MetaValue {
    if list || values.len() > 1 {
        return MetaValue::List(values);
    }
    match values.pop() {
        Some(value) => MetaValue::Scalar(value),
        None => MetaValue::Null,
    }
}
