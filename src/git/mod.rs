//! git
//!
//! The provider abstraction through which all git work flows.
//!
//! # Architecture
//!
//! The branch facade never touches a repository itself. It builds request
//! structs and hands them to a [`GitProvider`]:
//!
//! - [`Git2Provider`] - libgit2 against local working directories; the only
//!   place `git2` is imported
//! - [`mock::MockProvider`] - in-memory, recording, with failure injection
//!
//! # Invariants
//!
//! - Provider errors are typed ([`ProviderError`]) and reach callers unchanged
//! - Remote branch names may carry a `<remote>/` prefix; local names never do

mod interface;
pub mod mock;
mod provider;

pub use interface::Git2Provider;
pub use provider::{
    BranchRequest, DeleteBranchRequest, GitProvider, ListBranchesRequest, ProviderError,
    RenameBranchRequest,
};
