//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--root <dir>`: Root directory for repositories (overrides config)
//! - `--config <file>`: Config file to load instead of the default locations
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nostr-git - branch operations for repositories announced over nostr
#[derive(Parser, Debug)]
#[command(name = "nostr-git")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory under which repositories are checked out
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Load configuration from this file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List branches
    #[command(
        name = "list",
        visible_alias = "ls",
        long_about = "List branches of a repository.\n\n\
            With --event, the repository is located from a NIP-34 announcement \
            event and its local and remote branches are merged. With --dir, the \
            local branches of that working directory are listed.",
        after_help = "\
EXAMPLES:
    # Branches of an announced repository
    nostr-git list --event announcement.json

    # Read the event from stdin
    nak req -k 30617 -a <pubkey> wss://relay.example | nostr-git list --event -

    # Branches of a working directory, cloning it first if missing
    nostr-git list --dir ./grasp --url /srv/git/grasp.git"
    )]
    List {
        /// Announcement event JSON file (`-` for stdin)
        #[arg(long, value_name = "FILE", conflicts_with_all = ["dir", "url"])]
        event: Option<PathBuf>,

        /// Working directory to list
        #[arg(long, value_name = "DIR", required_unless_present = "event")]
        dir: Option<PathBuf>,

        /// URL to clone into --dir if it holds no repository
        #[arg(long, requires = "dir")]
        url: Option<String>,
    },

    /// Create a branch
    #[command(
        name = "create",
        long_about = "Create a branch at HEAD of <root>/<owner>/<repo>.",
        after_help = "\
EXAMPLES:
    nostr-git create alice notes feature/sync
    nostr-git create alice notes feature/sync --checkout"
    )]
    Create {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Name of the new branch
        branch: String,
        /// Check the new branch out
        #[arg(long)]
        checkout: bool,
    },

    /// Delete a branch
    #[command(name = "delete", visible_alias = "d")]
    Delete {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Branch to delete
        branch: String,
    },

    /// Rename a branch
    #[command(name = "rename")]
    Rename {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Current branch name
        old: String,
        /// New branch name
        new: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_requires_a_source() {
        assert!(Cli::try_parse_from(["nostr-git", "list"]).is_err());
    }

    #[test]
    fn event_and_dir_conflict() {
        let result =
            Cli::try_parse_from(["nostr-git", "list", "--event", "e.json", "--dir", "d"]);
        assert!(result.is_err());
    }

    #[test]
    fn url_requires_dir() {
        let result = Cli::try_parse_from(["nostr-git", "list", "--event", "e.json", "--url", "u"]);
        assert!(result.is_err());
    }

    #[test]
    fn create_parses_checkout() {
        let cli = Cli::try_parse_from(["nostr-git", "create", "alice", "notes", "dev", "--checkout"])
            .unwrap();
        match cli.command {
            Command::Create {
                owner,
                repo,
                branch,
                checkout,
            } => {
                assert_eq!((owner.as_str(), repo.as_str(), branch.as_str()), ("alice", "notes", "dev"));
                assert!(checkout);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nostr-git", "delete", "a", "b", "c", "--root", "/r", "--json"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/r")));
        assert!(cli.json);
    }
}
