//! ui
//!
//! Terminal output for the CLI.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and branch list formatting

pub mod output;
