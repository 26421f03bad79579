//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: single artwork lookup and download
//! - `batch`: manifest-driven downloads
//! - `setup`: config file creation

mod batch;
mod fetch;
mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Config};

pub use batch::cmd_batch;
pub use fetch::{cmd_fetch, cmd_lookup};
pub use setup::cmd_init_config;

/// Cover Finder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true, env = "COVER_FINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show catalog queries and candidates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Download the cover for one album
    Fetch {
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Album title
        #[arg(long)]
        album: String,
        /// Where to write the image
        #[arg(short, long, default_value = "cover.jpg")]
        output: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the artwork URL that would be downloaded
    Lookup {
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Album title
        #[arg(long)]
        album: String,
    },
    /// Download covers for every item in a TOML manifest
    Batch {
        /// Manifest with `[[item]]` tables (artist, album, output)
        manifest: PathBuf,
        /// Replace existing files
        #[arg(long)]
        overwrite: bool,
    },
    /// Write a config file with the default settings
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the parsed command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Fetch {
            artist,
            album,
            output,
            overwrite,
        } => cmd_fetch(&load_config(cli), artist, album, output, *overwrite),
        Commands::Lookup { artist, album } => cmd_lookup(&load_config(cli), artist, album),
        Commands::Batch {
            manifest,
            overwrite,
        } => cmd_batch(&load_config(cli), manifest, *overwrite),
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), *force),
    }
}

fn load_config(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}
