//! core::config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. The first config file found (see below)
//! 3. Explicit overrides such as `--root` (applied by the caller through
//!    [`Config::with_root_dir`])
//!
//! # Config Locations
//!
//! An explicit path (`--config`) must exist. Otherwise, searched in order:
//! 1. `$NOSTR_GIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/nostr-git/config.toml`
//! 3. `~/.nostr-git/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use nostr_git::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("repositories live under {}", config.root_dir().unwrap().display());
//! println!("remote: {}", config.remote());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "NOSTR_GIT_CONFIG";

/// Remote used when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("no data or home directory to place repositories under; set root_dir")]
    NoDefaultRoot,
}

/// Resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    file: FileConfig,
    root_override: Option<PathBuf>,
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration, from `explicit` if given, else from the standard
    /// locations. Missing standard files are not an error.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` does not exist, or a found file cannot be read,
    /// parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::discover(),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load a specific config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self {
            file,
            root_override: None,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    fn discover() -> Option<PathBuf> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let from_xdg = std::env::var_os("XDG_CONFIG_HOME")
            .map(|xdg| PathBuf::from(xdg).join("nostr-git/config.toml"));
        let from_home = dirs::home_dir().map(|home| home.join(".nostr-git/config.toml"));

        [from_env, from_xdg, from_home]
            .into_iter()
            .flatten()
            .find(|path| path.exists())
    }

    /// Override the root directory, taking precedence over the file.
    pub fn with_root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_override = Some(root.into());
        self
    }

    /// Root directory for repository working directories.
    ///
    /// Defaults to `<data dir>/nostr-git/repos`, or
    /// `~/.nostr-git/repos` on platforms without a data directory.
    pub fn root_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(root) = self.root_override.as_ref().or(self.file.root_dir.as_ref()) {
            return Ok(root.clone());
        }
        dirs::data_dir()
            .map(|data| data.join("nostr-git/repos"))
            .or_else(|| dirs::home_dir().map(|home| home.join(".nostr-git/repos")))
            .ok_or(ConfigError::NoDefaultRoot)
    }

    /// Remote name consulted for remote branches. Defaults to `origin`.
    pub fn remote(&self) -> &str {
        self.file.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// Path of the loaded config file, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.remote(), "origin");
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
            root_dir = "/srv/repos"
            remote = "upstream"
            "#,
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.root_dir().unwrap(), PathBuf::from("/srv/repos"));
        assert_eq!(config.remote(), "upstream");
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "root_dir = [");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_value_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "remote = \"a/b\"");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn root_override_wins() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "root_dir = \"/from/file\"");

        let config = Config::load(Some(&path)).unwrap().with_root_dir("/from/flag");
        assert_eq!(config.root_dir().unwrap(), PathBuf::from("/from/flag"));
    }
}
