//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--root <path>`: Vault root (overrides config)
//! - `--config <path>`: Read this global config file instead of the default
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use crate::core::frontmatter::ListStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fmeta - Read and edit front-matter metadata in plain-text documents
#[derive(Parser, Debug)]
#[command(name = "fmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Vault root; document paths are resolved against it
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Global config file to use instead of the default lookup
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a vault config file at the vault root
    #[command(
        name = "init",
        long_about = "Write a vault config file at <root>/.frontmeta/config.toml.\n\n\
            Settings in the vault config override the global config for every \
            document under the root. Refuses to overwrite an existing file \
            unless --force is given.",
        after_help = "\
EXAMPLES:
    # Markdown and plain text documents, inline lists
    fmeta --root ~/notes init --extension md --extension txt --list-style inline"
    )]
    Init {
        /// Document extension without the dot (repeatable)
        #[arg(long = "extension", value_name = "EXT")]
        extensions: Vec<String>,
        /// How list values are written
        #[arg(long, value_enum)]
        list_style: Option<ListStyleArg>,
        /// Overwrite an existing vault config
        #[arg(long)]
        force: bool,
    },

    /// Print the value of one metadata key
    #[command(
        name = "get",
        long_about = "Print the value of one metadata key.\n\n\
            Scalars are printed as-is, lists one item per line, and empty \
            values print nothing. Fails if the key is not present.",
        after_help = "\
EXAMPLES:
    fmeta get notes/today.md status
    fmeta get notes/today.md tags"
    )]
    Get {
        /// Document path, relative to the vault root
        path: PathBuf,
        /// Metadata key
        key: String,
    },

    /// Set a metadata key and write the document
    #[command(
        name = "set",
        long_about = "Set a metadata key and write the document.\n\n\
            With no values the key becomes empty. One value sets a scalar; \
            several values, or --list, set a list. The key keeps its position \
            if it already exists, otherwise it is appended.",
        after_help = "\
EXAMPLES:
    # Scalar
    fmeta set notes/today.md status done

    # List
    fmeta set notes/today.md tags work urgent

    # Single-item list
    fmeta set notes/today.md tags --list work

    # Empty value
    fmeta set notes/today.md reviewed"
    )]
    Set {
        /// Document path, relative to the vault root
        path: PathBuf,
        /// Metadata key
        key: String,
        /// Value(s) to set
        values: Vec<String>,
        /// Store the values as a list even if there is only one
        #[arg(long)]
        list: bool,
    },

    /// Remove a metadata key and write the document
    Delete {
        /// Document path, relative to the vault root
        path: PathBuf,
        /// Metadata key
        key: String,
    },

    /// Show all metadata of a document
    Show {
        /// Document path, relative to the vault root
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List documents under the vault root
    List,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    fmeta completion bash > ~/.local/share/bash-completion/completions/fmeta

    # Zsh
    fmeta completion zsh > ~/.zfunc/_fmeta

    # Fish
    fmeta completion fish > ~/.config/fish/completions/fmeta.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// List serialization style accepted on the command line
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyleArg {
    Block,
    Inline,
}

impl From<ListStyleArg> for ListStyle {
    fn from(arg: ListStyleArg) -> Self {
        match arg {
            ListStyleArg::Block => ListStyle::Block,
            ListStyleArg::Inline => ListStyle::Inline,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_collects_values() {
        let cli = Cli::try_parse_from(["fmeta", "set", "a.md", "tags", "x", "y", "--list"])
            .expect("parse");
        match cli.command {
            Command::Set {
                path,
                key,
                values,
                list,
            } => {
                assert_eq!(path, PathBuf::from("a.md"));
                assert_eq!(key, "tags");
                assert_eq!(values, vec!["x", "y"]);
                assert!(list);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn init_collects_extensions() {
        let cli = Cli::try_parse_from([
            "fmeta",
            "init",
            "--extension",
            "md",
            "--extension",
            "txt",
            "--list-style",
            "inline",
        ])
        .expect("parse");
        match cli.command {
            Command::Init {
                extensions,
                list_style,
                force,
            } => {
                assert_eq!(extensions, vec!["md", "txt"]);
                assert_eq!(list_style.map(ListStyle::from), Some(ListStyle::Inline));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fmeta", "list", "--root", "/notes", "-q"]).expect("parse");
        assert_eq!(cli.root, Some(PathBuf::from("/notes")));
        assert!(cli.quiet);
        assert!(!cli.debug);
    }
}
