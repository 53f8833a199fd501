//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and build the [`BranchOps`] facade
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! The CLI layer is thin: handlers call the facade and format its results.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::branches::BranchOps;
use crate::core::config::Config;
use crate::git::Git2Provider;
use crate::ui::output::Verbosity;

/// Everything a command handler needs.
#[derive(Debug)]
pub struct Context {
    pub ops: BranchOps,
    pub verbosity: Verbosity,
    pub json: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(root) = &cli.root {
        config = config.with_root_dir(root);
    }

    let ops = BranchOps::from_config(Arc::new(Git2Provider::new()), &config)?;
    let ctx = Context {
        ops,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(commands::dispatch(cli.command, &ctx))
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--debug` selects the level.
fn init_logging(debug: bool) {
    let default_level = if debug { "nostr_git=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when run() is called twice in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
