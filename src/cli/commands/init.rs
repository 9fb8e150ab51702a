//! cli::commands::init
//!
//! Write a vault config file.

use crate::cli::Context;
use crate::core::config::{CodecSection, Config, VaultConfig};
use crate::core::frontmatter::ListStyle;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Write `<root>/.frontmeta/config.toml`.
///
/// Only the settings given on the command line are written; everything
/// else keeps falling through to the global config.
pub fn init(
    ctx: &Context,
    extensions: Vec<String>,
    list_style: Option<ListStyle>,
    force: bool,
) -> Result<()> {
    let config = ctx.load_config()?;
    let root = match ctx.root.as_deref().or(config.root()) {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    if !root.is_dir() {
        bail!("vault root {} is not a directory", root.display());
    }

    let path = Config::vault_config_path(&root);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let vault_config = VaultConfig {
        extensions: (!extensions.is_empty()).then_some(extensions),
        codec: list_style.map(|style| CodecSection {
            list_style: Some(style),
        }),
    };

    let written = Config::write_vault(&root, &vault_config)
        .with_context(|| format!("failed to write {}", path.display()))?;

    output::success(format!("Wrote {}", written.display()), ctx.verbosity);
    Ok(())
}
