//! core
//!
//! Domain types and the pieces of repository addressing.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid
//! - [`canonical`] - Canonical repository keys
//! - [`paths`] - Working-directory resolution under the root
//! - [`config`] - Configuration schema and loading

pub mod canonical;
pub mod config;
pub mod paths;
pub mod types;
