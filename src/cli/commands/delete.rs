//! delete command - Delete a branch

use anyhow::Result;

use crate::branches::DeleteBranch;
use crate::cli::Context;
use crate::ui::output;

/// Delete `branch` from `<root>/<owner>/<repo>`.
pub async fn delete(ctx: &Context, owner: String, repo: String, branch: String) -> Result<()> {
    let message = format!("Deleted '{branch}' from {owner}/{repo}");

    ctx.ops
        .delete_branch(DeleteBranch {
            owner,
            repo,
            branch,
        })
        .await?;

    if !ctx.json {
        output::print(message, ctx.verbosity);
    }
    Ok(())
}
