//! git::mock
//!
//! In-memory provider for deterministic testing.
//!
//! # Design
//!
//! Branches are kept per directory as ordered lists, local and per remote.
//! Every call is recorded before it runs, so tests can assert both what the
//! facade asked for and what it got back. Failures can be injected per
//! operation, including separately for local and remote listings.
//!
//! # Example
//!
//! ```
//! use nostr_git::git::mock::MockProvider;
//! use nostr_git::git::{GitProvider, ListBranchesRequest};
//!
//! # tokio_test::block_on(async {
//! let git = MockProvider::new()
//!     .with_local("/repos/a", &["main", "dev"])
//!     .with_remote("/repos/a", "origin", &["origin/main", "origin/feature"]);
//!
//! let names = git.list_branches(ListBranchesRequest::local("/repos/a")).await.unwrap();
//! assert_eq!(names, vec!["main", "dev"]);
//! # });
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::provider::{
    BranchRequest, DeleteBranchRequest, GitProvider, ListBranchesRequest, ProviderError,
    RenameBranchRequest,
};

/// Mock provider for testing.
///
/// Clones share state, so a test can keep a handle after giving one to the
/// facade.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    inner: Arc<Mutex<MockProviderInner>>,
}

#[derive(Debug, Default)]
struct MockProviderInner {
    repos: HashMap<PathBuf, MockRepo>,
    fail_on: Vec<FailOn>,
    operations: Vec<MockOperation>,
}

#[derive(Debug, Default)]
struct MockRepo {
    local: Vec<String>,
    remotes: HashMap<String, Vec<String>>,
    head: Option<String>,
}

/// Which operation should fail, and with what.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail local listings.
    ListLocal(ProviderError),
    /// Fail remote listings.
    ListRemote(ProviderError),
    /// Fail branch creation.
    Branch(ProviderError),
    /// Fail branch deletion.
    DeleteBranch(ProviderError),
    /// Fail branch renames.
    RenameBranch(ProviderError),
}

/// Recorded call, in the order received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    ListBranches(ListBranchesRequest),
    Branch(BranchRequest),
    DeleteBranch(DeleteBranchRequest),
    RenameBranch(RenameBranchRequest),
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the local branches of `dir`, in listing order.
    pub fn with_local(self, dir: impl AsRef<Path>, names: &[&str]) -> Self {
        {
            let mut inner = self.lock();
            let repo = inner.repos.entry(dir.as_ref().to_path_buf()).or_default();
            repo.local = names.iter().map(|n| n.to_string()).collect();
        }
        self
    }

    /// Seed the branches `dir` knows for `remote`, exactly as they should be
    /// listed (prefixed or not).
    pub fn with_remote(self, dir: impl AsRef<Path>, remote: &str, names: &[&str]) -> Self {
        {
            let mut inner = self.lock();
            let repo = inner.repos.entry(dir.as_ref().to_path_buf()).or_default();
            repo.remotes
                .insert(remote.to_string(), names.iter().map(|n| n.to_string()).collect());
        }
        self
    }

    /// Mark `name` as the checked-out branch of `dir`.
    pub fn with_head(self, dir: impl AsRef<Path>, name: &str) -> Self {
        {
            let mut inner = self.lock();
            let repo = inner.repos.entry(dir.as_ref().to_path_buf()).or_default();
            repo.head = Some(name.to_string());
        }
        self
    }

    /// Add a failure. Several may be active at once.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on.push(fail_on);
        self
    }

    /// Remove all configured failures.
    pub fn clear_fail_on(&self) {
        self.lock().fail_on.clear();
    }

    /// All recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Local branch names of `dir` (for test verification).
    pub fn local_branches(&self, dir: impl AsRef<Path>) -> Vec<String> {
        self.lock()
            .repos
            .get(dir.as_ref())
            .map(|repo| repo.local.clone())
            .unwrap_or_default()
    }

    /// Checked-out branch of `dir` (for test verification).
    pub fn head(&self, dir: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .repos
            .get(dir.as_ref())
            .and_then(|repo| repo.head.clone())
    }

    fn lock(&self) -> MutexGuard<'_, MockProviderInner> {
        // A panic while holding the lock only happens inside a failing test.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, op: MockOperation) {
        self.lock().operations.push(op);
    }

    fn check_fail(&self, matches: impl Fn(&FailOn) -> Option<&ProviderError>) -> Result<(), ProviderError> {
        match self.lock().fail_on.iter().find_map(matches) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn not_a_repo(dir: &Path) -> ProviderError {
    ProviderError::NotARepo {
        path: dir.to_path_buf(),
    }
}

#[async_trait]
impl GitProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_branches(
        &self,
        request: ListBranchesRequest,
    ) -> Result<Vec<String>, ProviderError> {
        self.record(MockOperation::ListBranches(request.clone()));

        let inner = self.lock();
        match &request.remote {
            None => {
                if let Some(FailOn::ListLocal(err)) = inner
                    .fail_on
                    .iter()
                    .find(|f| matches!(f, FailOn::ListLocal(_)))
                {
                    return Err(err.clone());
                }
                inner
                    .repos
                    .get(&request.dir)
                    .map(|repo| repo.local.clone())
                    .ok_or_else(|| not_a_repo(&request.dir))
            }
            Some(remote) => {
                if let Some(FailOn::ListRemote(err)) = inner
                    .fail_on
                    .iter()
                    .find(|f| matches!(f, FailOn::ListRemote(_)))
                {
                    return Err(err.clone());
                }
                let repo = inner
                    .repos
                    .get(&request.dir)
                    .ok_or_else(|| not_a_repo(&request.dir))?;
                repo.remotes
                    .get(remote)
                    .cloned()
                    .ok_or_else(|| ProviderError::RemoteNotFound {
                        name: remote.clone(),
                    })
            }
        }
    }

    async fn branch(&self, request: BranchRequest) -> Result<(), ProviderError> {
        self.record(MockOperation::Branch(request.clone()));
        self.check_fail(|f| match f {
            FailOn::Branch(err) => Some(err),
            _ => None,
        })?;

        let mut inner = self.lock();
        let repo = inner
            .repos
            .get_mut(&request.dir)
            .ok_or_else(|| not_a_repo(&request.dir))?;

        if repo.local.contains(&request.reference) {
            return Err(ProviderError::BranchExists {
                name: request.reference,
            });
        }
        repo.local.push(request.reference.clone());
        if request.checkout {
            repo.head = Some(request.reference);
        }
        Ok(())
    }

    async fn delete_branch(&self, request: DeleteBranchRequest) -> Result<(), ProviderError> {
        self.record(MockOperation::DeleteBranch(request.clone()));
        self.check_fail(|f| match f {
            FailOn::DeleteBranch(err) => Some(err),
            _ => None,
        })?;

        let mut inner = self.lock();
        let repo = inner
            .repos
            .get_mut(&request.dir)
            .ok_or_else(|| not_a_repo(&request.dir))?;

        if repo.head.as_deref() == Some(request.reference.as_str()) {
            return Err(ProviderError::CheckedOutBranch {
                name: request.reference,
            });
        }
        let position = repo
            .local
            .iter()
            .position(|name| *name == request.reference)
            .ok_or_else(|| ProviderError::BranchNotFound {
                name: request.reference.clone(),
            })?;
        repo.local.remove(position);
        Ok(())
    }

    async fn rename_branch(&self, request: RenameBranchRequest) -> Result<(), ProviderError> {
        self.record(MockOperation::RenameBranch(request.clone()));
        self.check_fail(|f| match f {
            FailOn::RenameBranch(err) => Some(err),
            _ => None,
        })?;

        let mut inner = self.lock();
        let repo = inner
            .repos
            .get_mut(&request.dir)
            .ok_or_else(|| not_a_repo(&request.dir))?;

        if repo.local.contains(&request.reference) {
            return Err(ProviderError::BranchExists {
                name: request.reference,
            });
        }
        let slot = repo
            .local
            .iter_mut()
            .find(|name| **name == request.old_reference)
            .ok_or_else(|| ProviderError::BranchNotFound {
                name: request.old_reference.clone(),
            })?;
        *slot = request.reference.clone();
        if repo.head.as_deref() == Some(request.old_reference.as_str()) {
            repo.head = Some(request.reference);
        }
        Ok(())
    }
}
