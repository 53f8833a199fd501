//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! # Where announced repositories are checked out
//! root_dir = "/var/lib/nostr-git/repos"
//!
//! # Remote whose branches are merged into event listings
//! remote = "origin"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// On-disk configuration. Every field is optional; absent fields fall back
/// to the defaults documented on [`Config`](super::Config).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Root directory under which repository working directories live.
    pub root_dir: Option<PathBuf>,

    /// Remote consulted for remote branch names.
    pub remote: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root_dir {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "root_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(remote) = &self.remote {
            if remote.is_empty() || remote.contains('/') || remote.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid remote '{remote}': must be a non-empty name without '/' or spaces"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            root_dir = "/srv/repos"
            remote = "upstream"
            "#,
        )
        .unwrap();

        assert_eq!(config.root_dir, Some(PathBuf::from("/srv/repos")));
        assert_eq!(config.remote.as_deref(), Some("upstream"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("rootdir = \"/x\"");
        assert!(result.is_err());
    }

    #[test]
    fn bad_remote_rejected() {
        for remote in ["", "a/b", "has space"] {
            let config = FileConfig {
                remote: Some(remote.to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{remote:?} should be rejected");
        }
    }

    #[test]
    fn empty_root_rejected() {
        let config = FileConfig {
            root_dir: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
