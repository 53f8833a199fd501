//! core::paths
//!
//! Working-directory resolution under a configured root.
//!
//! # Schemes
//!
//! Two resolution schemes exist and are kept apart:
//!
//! - [`RepoPaths::for_key`]: `<root>/<canonical key>`, used when the
//!   repository is addressed by an announcement event
//! - [`RepoPaths::for_owner_repo`]: `<root>/<owner>/<repo>`, used when the
//!   caller names the repository explicitly
//!
//! They address the same directory only when the caller's `owner` matches
//! the canonical owner string, the lower-case hex public key.
//!
//! # Example
//!
//! ```
//! use nostr_git::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new("/var/lib/nostr-git");
//! assert_eq!(
//!     paths.for_owner_repo("alice", "notes").unwrap(),
//!     PathBuf::from("/var/lib/nostr-git/alice/notes")
//! );
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A path segment that cannot be joined under the root.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field} '{value}': must be a single non-empty path segment")]
pub struct PathError {
    /// Which input was rejected (`owner` or `repo`).
    pub field: &'static str,
    /// The rejected value.
    pub value: String,
}

/// Resolves repository working directories under a shared root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    root: PathBuf,
}

impl RepoPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The shared root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a canonical repository key (`<owner>/<name>`).
    ///
    /// The key is trusted: it is only ever produced by
    /// [`canonical_repo_key`](crate::core::canonical::canonical_repo_key).
    pub fn for_key(&self, canonical_key: &str) -> PathBuf {
        canonical_key
            .split('/')
            .fold(self.root.clone(), |dir, part| dir.join(part))
    }

    /// Directory for an explicitly named `owner`/`repo` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if either part is empty, `.`/`..`, or contains a
    /// path separator, so neither can escape the root.
    pub fn for_owner_repo(&self, owner: &str, repo: &str) -> Result<PathBuf, PathError> {
        check_segment("owner", owner)?;
        check_segment("repo", repo)?;
        Ok(self.root.join(owner).join(repo))
    }
}

fn check_segment(field: &'static str, value: &str) -> Result<(), PathError> {
    let bad = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
        || value.contains('\0');
    if bad {
        return Err(PathError {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
