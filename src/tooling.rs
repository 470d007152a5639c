//! Tooling & Integration Layer
//!
//! Command-line entry points over the note commands.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
