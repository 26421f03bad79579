//! Command-line interface for cover-finder.
//!
//! Wraps the resolver in commands for single lookups, downloads, batch
//! manifests and config file setup.

mod commands;

pub use commands::{Cli, Commands, run_command};
