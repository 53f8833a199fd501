//! git::provider
//!
//! The provider trait through which every git operation flows.
//!
//! # Design
//!
//! The trait is async because providers may clone over the network or hand
//! blocking libgit2 work to a thread pool. Requests are plain owned structs
//! so they can be moved onto such threads and recorded by test doubles.
//!
//! # Example
//!
//! ```ignore
//! use nostr_git::git::{GitProvider, ListBranchesRequest};
//!
//! async fn local_names(git: &dyn GitProvider) -> Result<Vec<String>, ProviderError> {
//!     git.list_branches(ListBranchesRequest::local("/repos/abc/grasp")).await
//! }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from provider operations.
///
/// The facade passes these through unchanged, so the variants describe
/// git-level failures callers may want to tell apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The directory is not a git repository.
    #[error("not a git repository: {path}")]
    NotARepo { path: PathBuf },

    /// The named branch does not exist.
    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    /// A branch with this name already exists.
    #[error("branch already exists: {name}")]
    BranchExists { name: String },

    /// The branch is checked out and cannot be deleted.
    #[error("cannot delete branch '{name}': it is checked out")]
    CheckedOutBranch { name: String },

    /// The name is not a valid branch name.
    #[error("invalid ref name: {message}")]
    InvalidRefName { message: String },

    /// The named remote is not configured.
    #[error("remote not found: {name}")]
    RemoteNotFound { name: String },

    /// HEAD does not point at a commit yet.
    #[error("repository has no commits")]
    UnbornHead,

    /// Cloning the seed URL failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Filesystem or lock error.
    #[error("repository access error: {message}")]
    AccessError { message: String },

    /// Anything else reported by the git backend.
    #[error("git error: {message}")]
    Internal { message: String },
}

impl From<TypeError> for ProviderError {
    fn from(err: TypeError) -> Self {
        ProviderError::InvalidRefName {
            message: err.to_string(),
        }
    }
}

/// Request to list branch names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBranchesRequest {
    /// Working directory of the repository.
    pub dir: PathBuf,
    /// List this remote's branches instead of local ones.
    pub remote: Option<String>,
    /// Seed URL, cloned into `dir` if it holds no repository yet.
    pub url: Option<String>,
}

impl ListBranchesRequest {
    /// Local branches of `dir`.
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            remote: None,
            url: None,
        }
    }

    /// Branches of `remote` as known to `dir`.
    pub fn remote(dir: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            remote: Some(remote.into()),
            url: None,
        }
    }
}

/// Request to create a branch at HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRequest {
    pub dir: PathBuf,
    /// Name of the new branch.
    pub reference: String,
    /// Check the new branch out after creating it.
    pub checkout: bool,
}

/// Request to delete a local branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBranchRequest {
    pub dir: PathBuf,
    pub reference: String,
}

/// Request to rename a local branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameBranchRequest {
    pub dir: PathBuf,
    /// Current name.
    pub old_reference: String,
    /// New name.
    pub reference: String,
}

/// Git operations over a working directory.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the facade shares one provider
/// behind an `Arc`. Concurrent calls against the same directory are only as
/// safe as the implementation makes them.
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Short name of the implementation, for logging.
    fn name(&self) -> &'static str;

    /// List branch names. Remote names may carry a `<remote>/` prefix.
    async fn list_branches(&self, request: ListBranchesRequest)
        -> Result<Vec<String>, ProviderError>;

    /// Create a branch at HEAD, optionally checking it out.
    async fn branch(&self, request: BranchRequest) -> Result<(), ProviderError>;

    /// Delete a local branch.
    async fn delete_branch(&self, request: DeleteBranchRequest) -> Result<(), ProviderError>;

    /// Rename a local branch.
    async fn rename_branch(&self, request: RenameBranchRequest) -> Result<(), ProviderError>;
}
