//! iTunes Search API client
//!
//! Builds the album search URL, fetches it through the rate-limit aware
//! fetcher and parses the JSON. A missing or malformed response is an
//! ordinary "nothing found", not an error.

use super::dto::CatalogResult;
use crate::config::CatalogConfig;
use crate::fetch::{HttpTransport, RateLimitAwareFetcher, ReqwestTransport, Sleeper, ThreadSleeper};

/// Catalog search client
pub struct CatalogQueryClient<T = ReqwestTransport, S = ThreadSleeper> {
    fetcher: RateLimitAwareFetcher<T, S>,
    search_url: String,
    media: String,
    entity: String,
}

impl<T: HttpTransport, S: Sleeper> CatalogQueryClient<T, S> {
    pub fn new(fetcher: RateLimitAwareFetcher<T, S>, config: &CatalogConfig) -> Self {
        Self {
            fetcher,
            search_url: config.search_url.clone(),
            media: config.media.clone(),
            entity: config.entity.clone(),
        }
    }

    /// The fetcher used for searches, shared with artwork downloads.
    pub fn fetcher(&self) -> &RateLimitAwareFetcher<T, S> {
        &self.fetcher
    }

    /// Search for albums matching already-normalized `artist` and `album`.
    pub fn query(&self, artist: &str, album: &str) -> CatalogResult {
        let url = self.search_url_for(&search_term(artist, album));
        tracing::debug!("Catalog query: {}", url);

        let text = self.fetcher.fetch_text(&url);
        if text.is_empty() {
            return CatalogResult::default();
        }

        match serde_json::from_str::<CatalogResult>(&text) {
            Ok(result) => {
                tracing::debug!("Catalog returned {} results", result.result_count);
                result
            }
            Err(e) => {
                tracing::debug!("Unparseable catalog response from {}: {}", url, e);
                CatalogResult::default()
            }
        }
    }

    fn search_url_for(&self, term: &str) -> String {
        format!(
            "{}?term={}&media={}&entity={}",
            self.search_url,
            urlencoding::encode(term),
            self.media,
            self.entity
        )
    }
}

/// One combined search term. When one string contains the other, repeating
/// it only hurts the catalog's relevance ranking, so the longer one is used.
pub fn search_term(artist: &str, album: &str) -> String {
    if artist.contains(album) {
        artist.to_string()
    } else if album.contains(artist) {
        album.to_string()
    } else {
        format!("{} {}", artist, album)
    }
}
