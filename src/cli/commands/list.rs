//! list command - List branches
//!
//! Two sources:
//!
//! - an announcement event (`--event`), listed through the event's canonical
//!   directory with local and remote branches merged
//! - a working directory (`--dir`), listed as is, optionally cloned first

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::event::RepoAnnouncementEvent;
use crate::ui::output;

/// List branches of the repository an event file announces.
///
/// `-` reads the event from stdin.
pub async fn list_event(ctx: &Context, path: &Path) -> Result<()> {
    let json = read_event(path)?;
    let event = RepoAnnouncementEvent::from_json(&json)
        .with_context(|| format!("failed to parse event from {}", path.display()))?;

    let listing = ctx.ops.list_branches_from_event(&event).await?;

    if ctx.json {
        output::json(&listing)?;
        return Ok(());
    }

    if let crate::branches::RemoteListing::Unavailable { remote, reason } = &listing.remote {
        output::warn(
            format!("remote '{remote}' unavailable, showing local branches only: {reason}"),
            ctx.verbosity,
        );
    }
    output::print(output::format_branches(&listing.branches), ctx.verbosity);
    Ok(())
}

/// List branches of a working directory.
pub async fn list_dir(ctx: &Context, dir: &Path, url: Option<&str>) -> Result<()> {
    let branches = ctx.ops.list_branches(url, dir).await?;

    if ctx.json {
        output::json(&branches)?;
    } else {
        output::print(output::format_branches(&branches), ctx.verbosity);
    }
    Ok(())
}

fn read_event(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read event from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
