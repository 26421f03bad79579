//! Single-album lookup and download commands.

use std::path::Path;

use crate::config::Config;
use crate::model::{Resolution, TrackMetadata};
use crate::resolver::{ArtworkResolver, FileSink};

/// Resolve and download the cover for one album
pub fn cmd_fetch(
    config: &Config,
    artist: &str,
    album: &str,
    output: &Path,
    overwrite: bool,
) -> anyhow::Result<()> {
    if output.exists() && !overwrite {
        println!("Skipping: {:?} already exists (use --overwrite to replace)", output);
        return Ok(());
    }

    let resolver = ArtworkResolver::from_config(config)?;
    let meta = TrackMetadata::new(artist, album);

    match resolver.resolve(&meta, &mut FileSink::new(output)) {
        Resolution::MatchFound { artwork_url, exact } => {
            println!("✓ Cover saved to {:?}", output);
            println!("  Source: {}", artwork_url);
            if !exact {
                println!("  (closest match, album title differs)");
            }
        }
        Resolution::NoMatch => {
            println!("✗ No cover found for {} - {}", artist, album);
        }
    }
    Ok(())
}

/// Print the artwork URL that `fetch` would download
pub fn cmd_lookup(config: &Config, artist: &str, album: &str) -> anyhow::Result<()> {
    let resolver = ArtworkResolver::from_config(config)?;

    match resolver.find_artwork(&TrackMetadata::new(artist, album)) {
        Some(found) => {
            let kind = if found.exact { "exact" } else { "approximate" };
            println!("{} ({} match)", found.artwork_url, kind);
        }
        None => {
            println!("✗ No cover found for {} - {}", artist, album);
        }
    }
    Ok(())
}
