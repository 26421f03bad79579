//! Cover Finder - fetches album cover art from the iTunes catalog.
//!
//! Searches the catalog for an artist/album pair, picks the matching
//! release among near-duplicates and downloads its large artwork.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod resolver;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive(format!("cover_finder={level}").parse()?))
        .init();

    cli::run_command(&args)
}
