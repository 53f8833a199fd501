//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Human output goes to stdout and respects the quiet flag. With `--json`
//! the command prints one JSON document instead. Warnings and errors go to
//! stderr.

use std::fmt::Display;

use serde::Serialize;

use crate::branches::Branch;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format branch names one per line, indented like `git branch`.
pub fn format_branches(branches: &[Branch]) -> String {
    branches
        .iter()
        .map(|branch| format!("  {}", branch.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Oid;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn formats_names_one_per_line() {
        let out = format_branches(&[Branch::named("main"), Branch::named("dev")]);
        assert_eq!(out, "  main\n  dev");
    }

    #[test]
    fn prints_names_only() {
        let branch = Branch {
            name: "main".into(),
            oid: Some(Oid::new("a".repeat(40)).unwrap()),
            is_head: true,
        };
        assert_eq!(format_branches(&[branch]), "  main");
    }

    #[test]
    fn empty_list_is_empty_string() {
        assert_eq!(format_branches(&[]), "");
    }
}
