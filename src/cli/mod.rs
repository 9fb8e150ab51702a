//! cli
//!
//! Command-line interface layer for frontmeta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the logger
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Every metadata change goes through
//! [`crate::store::LiveMetadata`], which persists the document itself; the
//! handlers only resolve paths and format output.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};
use std::path::PathBuf;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Vault root given on the command line
    pub root: Option<PathBuf>,
    /// Global config file given on the command line
    pub config: Option<PathBuf>,
    pub verbosity: Verbosity,
}

impl Context {
    /// Load configuration honoring `--config` and `--root`.
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path, self.root.as_deref())
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load(self.root.as_deref()).context("failed to load config")?,
        };
        Ok(config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logger(verbosity);

    let ctx = Context {
        root: cli.root.clone(),
        config: cli.config.clone(),
        verbosity,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install `env_logger`; `RUST_LOG` takes precedence over the flags.
fn init_logger(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Debug => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A logger may already be installed when run() is called from tests.
    let _ = env_logger::Builder::from_env(env).try_init();
}
