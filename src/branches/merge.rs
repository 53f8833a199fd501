//! branches::merge
//!
//! Merging local and remote-tracking branch names into one listing.

use std::collections::HashSet;

/// Merge local and remote branch names into a duplicate-free list.
///
/// Local names come first in the order given, followed by remote names not
/// already present. A leading `<remote>/` is stripped from remote names
/// before comparison, so `origin/main` collapses into a local `main`.
///
/// The result never contains an empty name: an entry that is empty, or
/// that is exactly `<remote>/`, names no branch and is dropped.
///
/// # Example
///
/// ```
/// use nostr_git::branches::merge_branch_names;
///
/// let local = vec!["main".to_string(), "dev".to_string()];
/// let remote = vec!["origin/main".to_string(), "origin/feature".to_string()];
///
/// assert_eq!(
///     merge_branch_names(local, remote, "origin"),
///     vec!["main", "dev", "feature"]
/// );
/// ```
pub fn merge_branch_names(local: Vec<String>, remote: Vec<String>, remote_name: &str) -> Vec<String> {
    let prefix = format!("{remote_name}/");
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(local.len() + remote.len());

    let remote = remote.into_iter().map(|name| match name.strip_prefix(&prefix) {
        Some(short) => short.to_string(),
        None => name,
    });

    for name in local.into_iter().chain(remote) {
        if !name.is_empty() && seen.insert(name.clone()) {
            merged.push(name);
        }
    }

    merged
}
