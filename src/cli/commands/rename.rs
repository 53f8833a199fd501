//! rename command - Rename a branch

use anyhow::Result;

use crate::branches::RenameBranch;
use crate::cli::Context;
use crate::ui::output;

/// Rename `old` to `new` in `<root>/<owner>/<repo>`.
pub async fn rename(
    ctx: &Context,
    owner: String,
    repo: String,
    old: String,
    new: String,
) -> Result<()> {
    let message = format!("Renamed '{old}' to '{new}' in {owner}/{repo}");

    ctx.ops
        .rename_branch(RenameBranch {
            owner,
            repo,
            old_branch: old,
            new_branch: new,
        })
        .await?;

    if !ctx.json {
        output::print(message, ctx.verbosity);
    }
    Ok(())
}
