//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! frontmeta has two configuration scopes:
//! - **Global**: User-level settings
//! - **Vault**: Overrides stored inside a vault root
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Vault config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$FRONTMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/frontmeta/config.toml`
//! 3. `~/.frontmeta/config.toml`
//!
//! # Vault Config Location
//!
//! `<root>/.frontmeta/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use frontmeta::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/notes"))).unwrap();
//! println!("List style: {}", config.list_style());
//! println!("Extensions: {:?}", config.extensions());
//! ```

pub mod schema;

pub use schema::{CodecSection, GlobalConfig, VaultConfig, VaultSection};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::frontmatter::ListStyle;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "FRONTMETA_CONFIG";

/// Extensions used when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: vault config overrides global
/// config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Vault configuration (if one was found)
    pub vault: Option<VaultConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the vault config file (if loaded)
    vault_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `vault_root` is provided, also loads the vault config. Otherwise
    /// the root from the global config (if any) is used to find it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(vault_root: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = Self::find_global()?;
        Self::assemble(global, global_path, vault_root)
    }

    /// Load configuration using an explicit global config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path, vault_root: Option<&Path>) -> Result<Config, ConfigError> {
        let global = Self::read_toml::<GlobalConfig>(path)?;
        Self::assemble(global, Some(path.to_path_buf()), vault_root)
    }

    fn assemble(
        global: GlobalConfig,
        global_path: Option<PathBuf>,
        vault_root: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        global.validate()?;

        let root = vault_root
            .map(Path::to_path_buf)
            .or_else(|| global.vault.as_ref().and_then(|v| v.root.clone()));

        let (vault, vault_path) = match root {
            Some(root) => {
                let path = Self::vault_config_path(&root);
                if path.exists() {
                    let vault = Self::read_toml::<VaultConfig>(&path)?;
                    vault.validate()?;
                    (Some(vault), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        if let Some(path) = &global_path {
            log::debug!("[CONFIG] global config loaded from {}", path.display());
        }
        if let Some(path) = &vault_path {
            log::debug!("[CONFIG] vault config loaded from {}", path.display());
        }

        Ok(Config {
            global,
            vault,
            global_path,
            vault_path,
        })
    }

    /// Find and read the global config from standard locations.
    fn find_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $FRONTMETA_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/frontmeta/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("frontmeta/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.frontmeta/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".frontmeta/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Read and parse a TOML config file.
    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path for a vault's config file.
    pub fn vault_config_path(root: &Path) -> PathBuf {
        root.join(".frontmeta/config.toml")
    }

    /// Write vault config atomically.
    pub fn write_vault(root: &Path, config: &VaultConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = Self::vault_config_path(root);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file, then rename).
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the configured vault root.
    ///
    /// Returns `None` if not configured (callers fall back to the current
    /// directory).
    pub fn root(&self) -> Option<&Path> {
        self.global.vault.as_ref().and_then(|v| v.root.as_deref())
    }

    /// Get the document extensions.
    ///
    /// Defaults to `["md"]` if not configured.
    pub fn extensions(&self) -> Vec<String> {
        self.vault
            .as_ref()
            .and_then(|v| v.extensions.clone())
            .or_else(|| self.global.vault.as_ref().and_then(|v| v.extensions.clone()))
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect())
    }

    /// Get the list serialization style.
    ///
    /// Defaults to [`ListStyle::Block`] if not configured.
    pub fn list_style(&self) -> ListStyle {
        self.vault
            .as_ref()
            .and_then(|v| v.codec.as_ref())
            .and_then(|c| c.list_style)
            .or_else(|| self.global.codec.as_ref().and_then(|c| c.list_style))
            .unwrap_or_default()
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded vault config file.
    pub fn vault_config_loaded_from(&self) -> Option<&Path> {
        self.vault_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_global(temp: &TempDir, contents: &str) -> PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.root().is_none());
        assert_eq!(config.extensions(), vec!["md".to_string()]);
        assert_eq!(config.list_style(), ListStyle::Block);
    }

    #[test]
    fn load_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = write_global(
            &temp,
            r#"
            [vault]
            root = "/srv/notes"

            [codec]
            list_style = "inline"
            "#,
        );

        let config = Config::load_from(&path, None).unwrap();
        assert_eq!(config.root(), Some(Path::new("/srv/notes")));
        assert_eq!(config.list_style(), ListStyle::Inline);
        assert_eq!(config.global_config_loaded_from(), Some(path.as_path()));
        assert!(config.vault_config_loaded_from().is_none());
    }

    #[test]
    fn vault_overrides_global() {
        let temp = TempDir::new().unwrap();
        let path = write_global(
            &temp,
            r#"
            [vault]
            extensions = ["txt"]

            [codec]
            list_style = "inline"
            "#,
        );

        let vault = TempDir::new().unwrap();
        Config::write_vault(
            vault.path(),
            &VaultConfig {
                extensions: Some(vec!["md".into(), "markdown".into()]),
                codec: Some(CodecSection {
                    list_style: Some(ListStyle::Block),
                }),
            },
        )
        .unwrap();

        let config = Config::load_from(&path, Some(vault.path())).unwrap();
        assert_eq!(config.extensions(), vec!["md".to_string(), "markdown".to_string()]);
        assert_eq!(config.list_style(), ListStyle::Block);
        assert_eq!(
            config.vault_config_loaded_from(),
            Some(Config::vault_config_path(vault.path()).as_path())
        );
    }

    #[test]
    fn global_root_locates_vault_config() {
        let vault = TempDir::new().unwrap();
        Config::write_vault(
            vault.path(),
            &VaultConfig {
                extensions: Some(vec!["txt".into()]),
                codec: None,
            },
        )
        .unwrap();

        let temp = TempDir::new().unwrap();
        let path = write_global(
            &temp,
            &format!("[vault]\nroot = {:?}\n", vault.path().to_str().unwrap()),
        );

        let config = Config::load_from(&path, None).unwrap();
        assert_eq!(config.extensions(), vec!["txt".to_string()]);
    }

    #[test]
    fn parse_error_names_path() {
        let temp = TempDir::new().unwrap();
        let path = write_global(&temp, "[codec\nlist_style = ");

        let err = Config::load_from(&path, None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = Config::load_from(&temp.path().join("nope.toml"), None).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().ends_with("nope.toml'"));
    }

    #[test]
    fn invalid_vault_config_rejected() {
        let vault = TempDir::new().unwrap();
        let path = Config::vault_config_path(vault.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "extensions = []").unwrap();

        let temp = TempDir::new().unwrap();
        let global = write_global(&temp, "");
        let err = Config::load_from(&global, Some(vault.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn write_vault_leaves_no_temp_file() {
        let vault = TempDir::new().unwrap();
        let path = Config::write_vault(vault.path(), &VaultConfig::default()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
