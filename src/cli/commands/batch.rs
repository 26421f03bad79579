//! Manifest-driven batch downloads.
//!
//! A manifest is a TOML file of `[[item]]` tables:
//!
//! ```toml
//! [[item]]
//! artist = "Blur"
//! album = "Parklife"
//! output = "Blur/Parklife/cover.jpg"
//! ```
//!
//! Relative outputs are resolved against the manifest's directory. Items are
//! processed one after another; a failure on one never stops the rest.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::fetch::{HttpTransport, Sleeper};
use crate::model::TrackMetadata;
use crate::resolver::{ArtworkResolver, FileSink};

/// Parsed batch manifest
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(rename = "item", default)]
    pub items: Vec<ManifestItem>,
}

/// One album to resolve
#[derive(Debug, Deserialize)]
pub struct ManifestItem {
    #[serde(flatten)]
    pub meta: TrackMetadata,
    pub output: PathBuf,
}

/// Counts reported at the end of a batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub missing: usize,
    pub skipped: usize,
}

/// Download covers for every manifest item
pub fn cmd_batch(config: &Config, manifest_path: &Path, overwrite: bool) -> anyhow::Result<()> {
    let manifest = load_manifest(manifest_path)?;
    println!("Resolving {} albums from {:?}", manifest.items.len(), manifest_path);

    let resolver = ArtworkResolver::from_config(config)?;
    let summary = run_batch(&resolver, &manifest.items, overwrite);

    println!();
    println!("✓ Found:   {}", summary.found);
    println!("✗ Missing: {}", summary.missing);
    if summary.skipped > 0 {
        println!("  Skipped: {} (already present)", summary.skipped);
    }
    Ok(())
}

/// Read a manifest and anchor relative outputs at its directory.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("reading manifest {}", path.display()))?;
    let mut manifest: Manifest =
        toml::from_str(&contents).map_err(|e| Error::manifest(path, e.to_string()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for item in &mut manifest.items {
        if item.output.is_relative() {
            item.output = base.join(&item.output);
        }
    }
    Ok(manifest)
}

/// Resolve each item in turn. Existing outputs are skipped unless `overwrite`.
pub fn run_batch<T: HttpTransport, S: Sleeper>(
    resolver: &ArtworkResolver<T, S>,
    items: &[ManifestItem],
    overwrite: bool,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for item in items {
        if item.output.exists() && !overwrite {
            tracing::debug!("Skipping {:?}, already exists", item.output);
            summary.skipped += 1;
            continue;
        }

        let resolution = resolver.resolve(&item.meta, &mut FileSink::new(&item.output));
        if resolution.is_found() {
            summary.found += 1;
        } else {
            println!("✗ {} - {}", item.meta.artist, item.meta.album);
            summary.missing += 1;
        }
    }

    summary
}
