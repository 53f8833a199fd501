//! create command - Create a branch at HEAD

use anyhow::Result;

use crate::branches::CreateBranch;
use crate::cli::Context;
use crate::ui::output;

/// Create `branch` in `<root>/<owner>/<repo>`, optionally checking it out.
pub async fn create(
    ctx: &Context,
    owner: String,
    repo: String,
    branch: String,
    checkout: bool,
) -> Result<()> {
    let message = if checkout {
        format!("Created and checked out '{branch}' in {owner}/{repo}")
    } else {
        format!("Created '{branch}' in {owner}/{repo}")
    };

    ctx.ops
        .create_branch(CreateBranch {
            owner,
            repo,
            branch,
            checkout,
        })
        .await?;

    if !ctx.json {
        output::print(message, ctx.verbosity);
    }
    Ok(())
}
