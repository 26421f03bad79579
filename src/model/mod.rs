//! Core data models shared across the resolver.
//!
//! [`TrackMetadata`] is what callers hand us; everything else is derived
//! from it during a single resolution and thrown away afterwards.

use serde::Deserialize;

/// The artist/album pair a cover is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackMetadata {
    pub artist: String,
    pub album: String,
}

impl TrackMetadata {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }
}

/// A candidate chosen by the selection scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkMatch {
    /// Artwork URL, already rewritten to the high-resolution variant
    pub artwork_url: String,
    /// Whether the normalized album matched exactly (vs. containment)
    pub exact: bool,
}

/// Terminal outcome of a resolution. Neither variant is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Artwork was downloaded and written to the sink
    MatchFound { artwork_url: String, exact: bool },
    /// Nothing was written
    NoMatch,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::MatchFound { .. })
    }
}
