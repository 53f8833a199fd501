//! nostr-git - branch operations for git repositories announced over nostr
//!
//! Repositories are identified by NIP-34 announcement events (kind `30617`)
//! and checked out under a shared root directory. This crate lists, creates,
//! deletes and renames their branches through a pluggable git provider.
//!
//! # Architecture
//!
//! - [`branches`] - The branch operations facade
//! - [`event`] - Announcement events: validation and parsing
//! - [`core`] - Strong types, canonical keys, paths and configuration
//! - [`git`] - Provider trait, libgit2 provider and a test double
//! - [`cli`] - The `nostr-git` command-line interface
//! - [`ui`] - Output formatting for the CLI
//!
//! # Invariants
//!
//! 1. Event-addressed repositories resolve to `<root>/<canonical key>`
//! 2. Explicitly addressed repositories resolve to `<root>/<owner>/<repo>`
//! 3. Provider errors reach callers unchanged, except a failed remote
//!    listing, which degrades to local branches and is reported

pub mod branches;
pub mod cli;
pub mod core;
pub mod event;
pub mod git;
pub mod ui;
