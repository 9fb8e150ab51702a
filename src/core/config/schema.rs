//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$FRONTMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/frontmeta/config.toml`
//! 3. `~/.frontmeta/config.toml` (canonical write location)
//!
//! # Vault Config
//!
//! Located at `.frontmeta/config.toml` inside the vault root.
//!
//! # Validation
//!
//! Config values are validated after parsing: extension lists must be
//! non-empty and hold bare extensions (`md`, not `.md`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::frontmatter::ListStyle;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [vault]
/// root = "/home/me/notes"
/// extensions = ["md", "markdown"]
///
/// [codec]
/// list_style = "block"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Vault location and document selection
    pub vault: Option<VaultSection>,

    /// Serialization settings
    pub codec: Option<CodecSection>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(exts) = self.vault.as_ref().and_then(|v| v.extensions.as_ref()) {
            validate_extensions(exts)?;
        }
        Ok(())
    }
}

/// Vault configuration (stored inside the vault root).
///
/// # Example
///
/// ```toml
/// extensions = ["md"]
///
/// [codec]
/// list_style = "inline"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Document extensions, overriding the global list
    pub extensions: Option<Vec<String>>,

    /// Serialization settings, overriding the global section
    pub codec: Option<CodecSection>,
}

impl VaultConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(exts) = &self.extensions {
            validate_extensions(exts)?;
        }
        Ok(())
    }
}

/// `[vault]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VaultSection {
    /// Vault root directory
    pub root: Option<PathBuf>,

    /// File extensions treated as documents
    pub extensions: Option<Vec<String>>,
}

/// `[codec]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecSection {
    /// How list values are written back
    pub list_style: Option<ListStyle>,
}

fn validate_extensions(exts: &[String]) -> Result<(), ConfigError> {
    if exts.is_empty() {
        return Err(ConfigError::InvalidValue(
            "extensions must list at least one extension".into(),
        ));
    }
    for ext in exts {
        if ext.is_empty() || ext.starts_with('.') || ext.contains('/') {
            return Err(ConfigError::InvalidValue(format!(
                "invalid extension '{}', use a bare extension like 'md'",
                ext
            )));
        }
    }
    Ok(())
}
