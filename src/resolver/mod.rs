//! Artwork resolution: search, fallback, candidate selection and download.
//!
//! The flow for one request:
//! 1. Normalize the requested artist and album
//! 2. Query the catalog
//! 3. If nothing came back, convert roman numerals and query once more
//! 4. Scan the results from the last catalog entry to the first for a match
//! 5. Download the large artwork variant into the caller's sink
//!
//! Nothing in here returns an error to the caller. A broken catalog entry, a
//! failed download or an unwritable sink are logged and reported as
//! [`Resolution::NoMatch`] so one bad item never stops a batch.

mod sink;

pub use sink::{ArtworkSink, FileSink};

use crate::catalog::{CatalogQueryClient, CatalogResult, StructuralError};
use crate::config::{CatalogConfig, Config};
use crate::error::{Result, ResultExt};
use crate::fetch::{FetchError, HttpTransport, RateLimitAwareFetcher, ReqwestTransport, Sleeper, ThreadSleeper};
use crate::model::{ArtworkMatch, Resolution, TrackMetadata};
use crate::normalize::{AlbumNormalizer, ArtistNormalizer, RomanNumeralConverter, TextNormalizer};

/// Resolves cover artwork for artist/album pairs.
pub struct ArtworkResolver<T = ReqwestTransport, S = ThreadSleeper> {
    catalog: CatalogQueryClient<T, S>,
    artist_normalizer: ArtistNormalizer,
    album_normalizer: AlbumNormalizer,
    numerals: RomanNumeralConverter,
    thumbnail_token: String,
    artwork_token: String,
}

impl ArtworkResolver {
    /// Build a resolver that talks to the real catalog.
    pub fn from_config(config: &Config) -> std::result::Result<Self, FetchError> {
        let fetcher = RateLimitAwareFetcher::from_config(config)?;
        Ok(Self::new(CatalogQueryClient::new(fetcher, &config.catalog), &config.catalog))
    }
}

impl<T: HttpTransport, S: Sleeper> ArtworkResolver<T, S> {
    pub fn new(catalog: CatalogQueryClient<T, S>, config: &CatalogConfig) -> Self {
        Self {
            catalog,
            artist_normalizer: ArtistNormalizer,
            album_normalizer: AlbumNormalizer,
            numerals: RomanNumeralConverter,
            thumbnail_token: config.thumbnail_token.clone(),
            artwork_token: config.artwork_token.clone(),
        }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &CatalogQueryClient<T, S> {
        &self.catalog
    }

    /// Find the artwork for `meta` and write it to `sink`.
    pub fn resolve(&self, meta: &TrackMetadata, sink: &mut impl ArtworkSink) -> Resolution {
        let (artist, album, result) = self.search(meta);

        match self.select(&artist, &album, &result) {
            Ok(Some(found)) => match self.download(&found.artwork_url, sink) {
                Ok(()) => {
                    tracing::info!("Downloaded cover art: {}", sink.describe());
                    return Resolution::MatchFound {
                        artwork_url: found.artwork_url,
                        exact: found.exact,
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Error encountered when downloading for artist ({}) and album ({}): {}",
                        artist,
                        album,
                        e
                    );
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::error!(
                    "Error encountered when downloading for artist ({}) and album ({}): {}",
                    artist,
                    album,
                    e
                );
            }
        }

        tracing::info!("Failed to find matching artist ({}) and album ({})", artist, album);
        Resolution::NoMatch
    }

    /// Run search and selection without downloading anything.
    pub fn find_artwork(&self, meta: &TrackMetadata) -> Option<ArtworkMatch> {
        let (artist, album, result) = self.search(meta);

        match self.select(&artist, &album, &result) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(
                    "Malformed catalog entry for artist ({}) and album ({}): {}",
                    artist,
                    album,
                    e
                );
                None
            }
        }
    }

    /// Query with the literal keys, then once more with roman numerals
    /// converted if the first round found nothing. Returns the keys that
    /// produced the result alongside it.
    fn search(&self, meta: &TrackMetadata) -> (String, String, CatalogResult) {
        let artist = self.artist_normalizer.normalize(&meta.artist);
        let album = self.album_normalizer.normalize(&meta.album);

        let result = self.catalog.query(&artist, &album);
        if !result.is_empty() {
            return (artist, album, result);
        }

        let artist = self.numerals.convert_all(&artist);
        let album = self.numerals.convert_all(&album);
        tracing::debug!("No results, retrying as artist ({}) and album ({})", artist, album);
        let result = self.catalog.query(&artist, &album);
        (artist, album, result)
    }

    /// Scan entries in reverse catalog order. The first containment match is
    /// kept unless an exact album match turns up, which ends the scan.
    fn select(
        &self,
        artist: &str,
        album: &str,
        result: &CatalogResult,
    ) -> std::result::Result<Option<ArtworkMatch>, StructuralError> {
        let mut selected: Option<ArtworkMatch> = None;

        for entry in result.results.iter().rev() {
            let entry_artist = self.artist_normalizer.normalize(entry.artist_name()?);
            let entry_album = self.album_normalizer.normalize(entry.collection_name()?);

            if !entry_artist.contains(artist) || !entry_album.contains(album) {
                continue;
            }

            let exact = entry_album == album;
            if selected.is_none() || exact {
                tracing::debug!("Candidate: {} - {} (exact: {})", entry_artist, entry_album, exact);
                selected = Some(ArtworkMatch {
                    artwork_url: upscale_artwork_url(
                        entry.artwork_url_small()?,
                        &self.thumbnail_token,
                        &self.artwork_token,
                    ),
                    exact,
                });
            }

            if exact {
                break;
            }
        }

        Ok(selected)
    }

    fn download(&self, url: &str, sink: &mut impl ArtworkSink) -> Result<()> {
        let data = self.catalog.fetcher().fetch(url).with_context("downloading artwork")?;
        sink.write_artwork(&data)
            .with_context(format!("writing {}", sink.describe()))?;
        Ok(())
    }
}

/// Swap the thumbnail resolution token for the large one.
pub fn upscale_artwork_url(url: &str, thumbnail_token: &str, artwork_token: &str) -> String {
    url.replace(thumbnail_token, artwork_token)
}
