//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the vault from configuration and flags
//! 2. Loads live metadata for the requested document
//! 3. Formats and displays output
//!
//! Handlers never write documents directly; mutations go through the store.
//!
//! # Async Commands
//!
//! Document I/O is async. The dispatch function builds a tokio runtime and
//! blocks on the handler, keeping the CLI entry point synchronous.

mod completion;
mod delete;
mod get;
mod init;
mod list;
mod set;
mod show;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use delete::delete;
pub use get::get;
pub use init::init;
pub use list::list;
pub use set::set;
pub use show::show;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::document::FsDocument;
use crate::store::LiveMetadata;
use crate::vault::Vault;
use anyhow::{anyhow, Context as _, Result};
use std::path::Path;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match command {
            Command::Init {
                extensions,
                list_style,
                force,
            } => init::init(ctx, extensions, list_style.map(Into::into), force),
            Command::Get { path, key } => get::get(ctx, &path, &key).await,
            Command::Set {
                path,
                key,
                values,
                list,
            } => set::set(ctx, &path, &key, values, list).await,
            Command::Delete { path, key } => delete::delete(ctx, &path, &key).await,
            Command::Show { path, json } => show::show(ctx, &path, json).await,
            Command::List => list::list(ctx).await,
            Command::Completion { shell } => completion::completion(shell),
        }
    })
}

/// Resolve the vault for this invocation.
///
/// The root comes from `--root`, then the config, then the current directory.
pub(crate) fn open_vault(ctx: &Context) -> Result<Vault> {
    let config = ctx.load_config()?;
    let vault = Vault::from_config(&config, ctx.root.as_deref())
        .context("failed to open vault")?;
    log::debug!("[CLI] vault root {}", vault.root().display());
    Ok(vault)
}

/// Load live metadata for `path`, failing if the document does not exist.
pub(crate) async fn load_document(
    vault: &Vault,
    path: &Path,
) -> Result<LiveMetadata<FsDocument>> {
    vault
        .metadata_by_path(path)
        .await
        .with_context(|| format!("failed to load {}", path.display()))?
        .ok_or_else(|| anyhow!("no document at {}", path.display()))
}
