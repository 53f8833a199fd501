//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Turns its arguments into facade options
//! 2. Calls [`BranchOps`](crate::branches::BranchOps)
//! 3. Formats and displays the result
//!
//! Handlers are async because the facade is; [`crate::cli::run`] drives
//! them on a tokio runtime.

mod create;
mod delete;
mod list;
mod rename;

pub use create::create;
pub use delete::delete;
pub use list::{list_dir, list_event};
pub use rename::rename;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::List {
            event: Some(path), ..
        } => list_event(ctx, &path).await,
        Command::List {
            event: None,
            dir: Some(dir),
            url,
        } => list_dir(ctx, &dir, url.as_deref()).await,
        Command::List {
            event: None,
            dir: None,
            ..
        } => anyhow::bail!("either --event or --dir is required"),
        Command::Create {
            owner,
            repo,
            branch,
            checkout,
        } => create(ctx, owner, repo, branch, checkout).await,
        Command::Delete {
            owner,
            repo,
            branch,
        } => delete(ctx, owner, repo, branch).await,
        Command::Rename {
            owner,
            repo,
            old,
            new,
        } => rename(ctx, owner, repo, old, new).await,
    }
}
