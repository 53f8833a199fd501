//! branches
//!
//! Branch operations over announced repositories.
//!
//! # Overview
//!
//! [`BranchOps`] turns branch intents into [`GitProvider`] calls. It owns
//! no repository state: each call resolves a working directory under the
//! configured root, calls the provider and reshapes the result.
//!
//! # Directory resolution
//!
//! - [`BranchOps::list_branches_from_event`] uses the canonical key of the
//!   announced repository (`<root>/<owner>/<name>`)
//! - create, delete and rename use the caller's `owner`/`repo`
//!   (`<root>/<owner>/<repo>`)
//! - [`BranchOps::list_branches`] takes the directory as given
//!
//! # Failure policy
//!
//! Everything fails fast and passes the underlying error through, with one
//! exception: when the remote listing of an event-addressed repository
//! fails, the listing carries on with local branches only and reports it in
//! [`BranchListing::remote`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nostr_git::branches::BranchOps;
//! use nostr_git::git::mock::MockProvider;
//!
//! # tokio_test::block_on(async {
//! let git = MockProvider::new().with_local("/repos/a", &["main"]);
//! let ops = BranchOps::new(Arc::new(git), "/repos");
//!
//! let branches = ops.list_branches(None, "/repos/a").await.unwrap();
//! assert_eq!(branches[0].name, "main");
//! assert!(!branches[0].is_head);
//! # });
//! ```

mod merge;

pub use merge::merge_branch_names;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::core::canonical::{canonical_repo_key, fallback_identifier, KeyError};
use crate::core::config::{Config, ConfigError, DEFAULT_REMOTE};
use crate::core::paths::{PathError, RepoPaths};
use crate::core::types::Oid;
use crate::event::{
    assert_repo_announcement_event, parse_repo_announcement_event, EventError,
    RepoAnnouncementEvent,
};
use crate::git::{
    BranchRequest, DeleteBranchRequest, GitProvider, ListBranchesRequest, ProviderError,
    RenameBranchRequest,
};

/// Errors from branch operations. Each variant carries its source as is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BranchError {
    /// The announcement event is malformed.
    #[error(transparent)]
    Validation(#[from] EventError),

    /// Neither the repository id nor the fallback identifier canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] KeyError),

    /// An explicit owner or repo cannot be used as a directory name.
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// The git provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A branch as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    /// Commit the branch points at; listings do not resolve it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<Oid>,
    /// Listings do not inspect HEAD, so this is always `false`.
    pub is_head: bool,
}

impl Branch {
    /// A branch known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oid: None,
            is_head: false,
        }
    }
}

/// Whether remote branches made it into an event listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteListing {
    /// Remote branch names were merged in.
    Included { remote: String },
    /// The remote could not be listed; only local branches are present.
    Unavailable { remote: String, reason: String },
}

/// Result of [`BranchOps::list_branches_from_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchListing {
    /// Working directory that was listed.
    pub dir: PathBuf,
    pub branches: Vec<Branch>,
    pub remote: RemoteListing,
}

impl BranchListing {
    /// True when the remote listing failed and was skipped.
    pub fn is_degraded(&self) -> bool {
        matches!(self.remote, RemoteListing::Unavailable { .. })
    }

    /// Branch names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Options for [`BranchOps::create_branch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranch {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Check the new branch out immediately.
    pub checkout: bool,
}

/// Options for [`BranchOps::delete_branch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBranch {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// Options for [`BranchOps::rename_branch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameBranch {
    pub owner: String,
    pub repo: String,
    pub old_branch: String,
    pub new_branch: String,
}

/// Branch operations facade.
///
/// Cheap to clone; holds the provider behind an `Arc` and immutable
/// configuration only.
#[derive(Clone)]
pub struct BranchOps {
    provider: Arc<dyn GitProvider>,
    paths: RepoPaths,
    remote: String,
}

impl std::fmt::Debug for BranchOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchOps")
            .field("provider", &self.provider.name())
            .field("root", &self.paths.root())
            .field("remote", &self.remote)
            .finish()
    }
}

impl BranchOps {
    /// Create a facade rooted at `root_dir`, listing the `origin` remote.
    pub fn new(provider: Arc<dyn GitProvider>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            paths: RepoPaths::new(root_dir),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Create a facade from loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails if no root directory is configured and none can be defaulted.
    pub fn from_config(provider: Arc<dyn GitProvider>, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(provider, config.root_dir()?).with_remote(config.remote()))
    }

    /// Use a different remote for remote branch names.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// The root directory repositories are resolved under.
    pub fn root_dir(&self) -> &Path {
        self.paths.root()
    }

    /// Canonical key of the repository an event announces.
    ///
    /// Tries the announced repository id first, then
    /// `<pubkey>:<name or repo id>`.
    ///
    /// # Errors
    ///
    /// - [`BranchError::Validation`] if the event is not an announcement
    /// - [`BranchError::Canonicalization`] with the fallback's error if
    ///   neither identifier canonicalizes
    pub fn canonical_key(&self, event: &RepoAnnouncementEvent) -> Result<String, BranchError> {
        assert_repo_announcement_event(event)?;
        let repo = parse_repo_announcement_event(event)?;

        match canonical_repo_key(&repo.repo_id) {
            Ok(key) => Ok(key),
            Err(err) => {
                let fallback =
                    fallback_identifier(&event.pubkey, repo.name.as_deref(), &repo.repo_id);
                tracing::debug!(
                    repo_id = %repo.repo_id,
                    fallback = %fallback,
                    error = %err,
                    "repo id is not canonical, using fallback"
                );
                Ok(canonical_repo_key(&fallback)?)
            }
        }
    }

    /// Directory an event's repository lives in.
    pub fn dir_for_event(&self, event: &RepoAnnouncementEvent) -> Result<PathBuf, BranchError> {
        Ok(self.paths.for_key(&self.canonical_key(event)?))
    }

    /// List local and remote branches of the repository an event announces.
    ///
    /// The event is validated before any provider call. Local listing errors
    /// propagate; a failed remote listing is logged and reported as
    /// [`RemoteListing::Unavailable`].
    ///
    /// # Errors
    ///
    /// See [`BranchOps::canonical_key`]; plus [`BranchError::Provider`] if
    /// local branches cannot be listed.
    pub async fn list_branches_from_event(
        &self,
        event: &RepoAnnouncementEvent,
    ) -> Result<BranchListing, BranchError> {
        let dir = self.dir_for_event(event)?;
        tracing::debug!(dir = %dir.display(), "listing branches for announcement");

        let local = self
            .provider
            .list_branches(ListBranchesRequest::local(&dir))
            .await?;

        let (remote_names, remote) = match self
            .provider
            .list_branches(ListBranchesRequest::remote(&dir, &self.remote))
            .await
        {
            Ok(names) => (
                names,
                RemoteListing::Included {
                    remote: self.remote.clone(),
                },
            ),
            Err(err) => {
                tracing::warn!(
                    remote = %self.remote,
                    dir = %dir.display(),
                    error = %err,
                    "could not list remote branches, continuing with local branches"
                );
                (
                    Vec::new(),
                    RemoteListing::Unavailable {
                        remote: self.remote.clone(),
                        reason: err.to_string(),
                    },
                )
            }
        };

        let branches = merge_branch_names(local, remote_names, &self.remote)
            .into_iter()
            .map(Branch::named)
            .collect();

        Ok(BranchListing {
            dir,
            branches,
            remote,
        })
    }

    /// List the branches of a working directory.
    ///
    /// `url` lets the provider clone the repository into `dir` if it is not
    /// there yet.
    ///
    /// # Errors
    ///
    /// Returns [`BranchError::Provider`] unchanged.
    pub async fn list_branches(
        &self,
        url: Option<&str>,
        dir: impl Into<PathBuf>,
    ) -> Result<Vec<Branch>, BranchError> {
        let request = ListBranchesRequest {
            dir: dir.into(),
            remote: None,
            url: url.map(str::to_string),
        };
        let names = self.provider.list_branches(request).await?;
        Ok(names.into_iter().map(Branch::named).collect())
    }

    /// Create a branch at HEAD of `<root>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// [`BranchError::InvalidPath`] for unusable owner/repo, otherwise the
    /// provider's error (e.g. branch exists, invalid name).
    pub async fn create_branch(&self, opts: CreateBranch) -> Result<(), BranchError> {
        let dir = self.paths.for_owner_repo(&opts.owner, &opts.repo)?;
        tracing::debug!(dir = %dir.display(), branch = %opts.branch, checkout = opts.checkout, "creating branch");

        self.provider
            .branch(BranchRequest {
                dir,
                reference: opts.branch,
                checkout: opts.checkout,
            })
            .await?;
        Ok(())
    }

    /// Delete a branch of `<root>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// [`BranchError::InvalidPath`] for unusable owner/repo, otherwise the
    /// provider's error (e.g. branch checked out, not found).
    pub async fn delete_branch(&self, opts: DeleteBranch) -> Result<(), BranchError> {
        let dir = self.paths.for_owner_repo(&opts.owner, &opts.repo)?;
        tracing::debug!(dir = %dir.display(), branch = %opts.branch, "deleting branch");

        self.provider
            .delete_branch(DeleteBranchRequest {
                dir,
                reference: opts.branch,
            })
            .await?;
        Ok(())
    }

    /// Rename a branch of `<root>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// [`BranchError::InvalidPath`] for unusable owner/repo, otherwise the
    /// provider's error (e.g. name collision, source not found).
    pub async fn rename_branch(&self, opts: RenameBranch) -> Result<(), BranchError> {
        let dir = self.paths.for_owner_repo(&opts.owner, &opts.repo)?;
        tracing::debug!(
            dir = %dir.display(),
            from = %opts.old_branch,
            to = %opts.new_branch,
            "renaming branch"
        );

        self.provider
            .rename_branch(RenameBranchRequest {
                dir,
                old_reference: opts.old_branch,
                reference: opts.new_branch,
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockProvider;

    #[test]
    fn branch_serializes_without_oid() {
        let json = serde_json::to_value(Branch::named("main")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "main", "is_head": false }));
    }

    #[test]
    fn remote_listing_serializes_with_status() {
        let json = serde_json::to_value(RemoteListing::Unavailable {
            remote: "origin".into(),
            reason: "remote not found: origin".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["remote"], "origin");
    }

    #[test]
    fn debug_names_the_provider() {
        let ops = BranchOps::new(Arc::new(MockProvider::new()), "/repos");
        let debug = format!("{ops:?}");
        assert!(debug.contains("mock"));
        assert!(debug.contains("origin"));
    }

    #[test]
    fn config_supplies_root_and_remote() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "root_dir = \"/srv\"\nremote = \"upstream\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();

        let ops = BranchOps::from_config(Arc::new(MockProvider::new()), &config).unwrap();

        assert_eq!(ops.root_dir(), Path::new("/srv"));
        assert_eq!(ops.remote, "upstream");
    }

    #[tokio::test]
    async fn explicit_path_guard_runs_before_provider() {
        let git = MockProvider::new();
        let ops = BranchOps::new(Arc::new(git.clone()), "/repos");

        let err = ops
            .delete_branch(DeleteBranch {
                owner: "..".into(),
                repo: "x".into(),
                branch: "main".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BranchError::InvalidPath(_)));
        assert!(git.operations().is_empty());
    }
}
