//! git::interface
//!
//! libgit2-backed [`GitProvider`].
//!
//! This is the only module that imports `git2`. Every call opens the
//! repository fresh on a blocking thread, performs one operation and
//! normalizes libgit2 errors into [`ProviderError`] variants.
//!
//! # Clone on demand
//!
//! [`ListBranchesRequest::url`] seeds a missing working directory: if `dir`
//! holds no repository, the URL is cloned there first. The crate builds
//! libgit2 without network transports, so only local and `file://` URLs
//! can be cloned.
//!
//! # Example
//!
//! ```ignore
//! use nostr_git::git::{Git2Provider, GitProvider, ListBranchesRequest};
//!
//! let git = Git2Provider::new();
//! let names = git.list_branches(ListBranchesRequest::local("/repos/abc/grasp")).await?;
//! ```

use std::path::Path;

use async_trait::async_trait;
use git2::{BranchType, ErrorCode, Repository};

use super::provider::{
    BranchRequest, DeleteBranchRequest, GitProvider, ListBranchesRequest, ProviderError,
    RenameBranchRequest,
};
use crate::core::types::BranchName;

impl ProviderError {
    /// Categorize a libgit2 error raised while operating on `name`.
    fn from_git2(err: git2::Error, name: &str) -> Self {
        match err.code() {
            ErrorCode::NotFound => ProviderError::BranchNotFound {
                name: name.to_string(),
            },
            ErrorCode::Exists => ProviderError::BranchExists {
                name: name.to_string(),
            },
            ErrorCode::InvalidSpec => ProviderError::InvalidRefName {
                message: format!("{}: {}", name, err.message()),
            },
            ErrorCode::UnbornBranch => ProviderError::UnbornHead,
            _ => ProviderError::from(err),
        }
    }
}

impl From<git2::Error> for ProviderError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            ErrorCode::Locked => ProviderError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            ErrorCode::UnbornBranch => ProviderError::UnbornHead,
            _ => ProviderError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

/// Provider that operates on local working directories through libgit2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Provider;

impl Git2Provider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GitProvider for Git2Provider {
    fn name(&self) -> &'static str {
        "libgit2"
    }

    async fn list_branches(
        &self,
        request: ListBranchesRequest,
    ) -> Result<Vec<String>, ProviderError> {
        run_blocking(move || list_branches_sync(&request)).await
    }

    async fn branch(&self, request: BranchRequest) -> Result<(), ProviderError> {
        run_blocking(move || create_branch_sync(&request)).await
    }

    async fn delete_branch(&self, request: DeleteBranchRequest) -> Result<(), ProviderError> {
        run_blocking(move || delete_branch_sync(&request)).await
    }

    async fn rename_branch(&self, request: RenameBranchRequest) -> Result<(), ProviderError> {
        run_blocking(move || rename_branch_sync(&request)).await
    }
}

/// Run a libgit2 operation on the blocking pool.
async fn run_blocking<T, F>(op: F) -> Result<T, ProviderError>
where
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ProviderError::Internal {
            message: format!("git task failed: {e}"),
        })?
}

fn open(dir: &Path) -> Result<Repository, ProviderError> {
    Repository::open(dir).map_err(|_| ProviderError::NotARepo {
        path: dir.to_path_buf(),
    })
}

fn list_branches_sync(request: &ListBranchesRequest) -> Result<Vec<String>, ProviderError> {
    let repo = match (Repository::open(&request.dir), &request.url) {
        (Ok(repo), _) => repo,
        (Err(_), Some(url)) => {
            tracing::debug!(url = %url, dir = %request.dir.display(), "cloning seed url");
            git2::build::RepoBuilder::new()
                .clone(url, &request.dir)
                .map_err(|e| ProviderError::CloneFailed {
                    url: url.clone(),
                    message: e.message().to_string(),
                })?
        }
        (Err(_), None) => {
            return Err(ProviderError::NotARepo {
                path: request.dir.clone(),
            })
        }
    };

    match &request.remote {
        None => branch_names(&repo, BranchType::Local),
        Some(remote) => {
            repo.find_remote(remote)
                .map_err(|_| ProviderError::RemoteNotFound {
                    name: remote.clone(),
                })?;

            let prefix = format!("{remote}/");
            let head = format!("{remote}/HEAD");
            Ok(branch_names(&repo, BranchType::Remote)?
                .into_iter()
                .filter(|name| name.starts_with(&prefix) && *name != head)
                .collect())
        }
    }
}

/// Short names of all branches of one type, skipping non-UTF-8 names.
fn branch_names(repo: &Repository, kind: BranchType) -> Result<Vec<String>, ProviderError> {
    let mut names = Vec::new();
    for entry in repo.branches(Some(kind))? {
        let (branch, _) = entry?;
        if let Some(name) = branch.name().ok().flatten() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn create_branch_sync(request: &BranchRequest) -> Result<(), ProviderError> {
    let name = BranchName::new(request.reference.as_str())?;
    let repo = open(&request.dir)?;

    let head = repo.head().map_err(|e| match e.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => ProviderError::UnbornHead,
        _ => ProviderError::from(e),
    })?;
    let commit = head.peel_to_commit()?;

    repo.branch(name.as_str(), &commit, false)
        .map_err(|e| ProviderError::from_git2(e, name.as_str()))?;

    if request.checkout {
        repo.set_head(&name.to_ref())?;
        repo.checkout_head(Some(git2::build::CheckoutBuilder::new().safe()))?;
    }

    Ok(())
}

fn delete_branch_sync(request: &DeleteBranchRequest) -> Result<(), ProviderError> {
    let repo = open(&request.dir)?;
    let mut branch = repo
        .find_branch(&request.reference, BranchType::Local)
        .map_err(|e| ProviderError::from_git2(e, &request.reference))?;

    if branch.is_head() {
        return Err(ProviderError::CheckedOutBranch {
            name: request.reference.clone(),
        });
    }

    branch.delete()?;
    Ok(())
}

fn rename_branch_sync(request: &RenameBranchRequest) -> Result<(), ProviderError> {
    let new_name = BranchName::new(request.reference.as_str())?;
    let repo = open(&request.dir)?;
    let mut branch = repo
        .find_branch(&request.old_reference, BranchType::Local)
        .map_err(|e| ProviderError::from_git2(e, &request.old_reference))?;

    branch
        .rename(new_name.as_str(), false)
        .map_err(|e| ProviderError::from_git2(e, new_name.as_str()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git2_error(code: ErrorCode) -> git2::Error {
        git2::Error::new(code, git2::ErrorClass::Reference, "boom")
    }

    #[test]
    fn not_found_maps_to_branch_not_found() {
        let err = ProviderError::from_git2(git2_error(ErrorCode::NotFound), "dev");
        assert_eq!(err, ProviderError::BranchNotFound { name: "dev".into() });
    }

    #[test]
    fn exists_maps_to_branch_exists() {
        let err = ProviderError::from_git2(git2_error(ErrorCode::Exists), "dev");
        assert_eq!(err, ProviderError::BranchExists { name: "dev".into() });
    }

    #[test]
    fn locked_maps_to_access_error() {
        let err = ProviderError::from(git2_error(ErrorCode::Locked));
        assert!(matches!(err, ProviderError::AccessError { .. }));
    }

    #[test]
    fn other_codes_are_internal() {
        let err = ProviderError::from(git2_error(ErrorCode::GenericError));
        assert_eq!(
            err,
            ProviderError::Internal {
                message: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_repo_without_url_is_not_a_repo() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("absent");

        let err = Git2Provider::new()
            .list_branches(ListBranchesRequest::local(&dir))
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::NotARepo { path: dir });
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_before_opening() {
        let err = Git2Provider::new()
            .branch(BranchRequest {
                dir: "/nonexistent".into(),
                reference: "bad name".into(),
                checkout: false,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidRefName { .. }));
    }
}
