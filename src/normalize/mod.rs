//! Text normalization for artist and album comparison.
//!
//! Catalog entries and local tags rarely agree on casing, punctuation or
//! edition annotations. Both sides are reduced to a comparison key before
//! matching:
//!
//! 1. Case folding and diacritic folding (NFKD, combining marks dropped)
//! 2. Removal of annotation patterns specific to artists or albums
//! 3. `&` spelled out, apostrophes dropped, other punctuation turned into spaces
//! 4. Whitespace collapsed
//!
//! Keys only contain lowercase alphanumerics separated by single spaces, so
//! normalizing a key again yields the same key.

mod roman;

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub use roman::RomanNumeralConverter;

/// Produces a comparison key from a raw artist or album string.
pub trait TextNormalizer {
    /// Normalize `raw`. Never fails; junk input yields an empty key.
    fn normalize(&self, raw: &str) -> String;
}

/// Bracketed album annotations: "(Remastered)", "[Deluxe Edition]", "(Live)", ...
static ALBUM_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\(\[][^\)\]]*\b(?:remaster(?:ed)?|deluxe|edition|live|expanded|anniversary|bonus|explicit|clean|mono|stereo|reissue|version|(?:disc|cd)\s*\d+)\b[^\)\]]*[\)\]]",
    )
    .expect("album annotation pattern")
});

/// Dash suffixes the catalog appends to collection names: "- Single", "- EP",
/// "- Remastered 2009", "- Deluxe Edition".
static ALBUM_DASH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s+[-–—]\s+(?:single|ep|(?:\d{4}\s+)?remaster(?:ed)?(?:\s+\d{4})?(?:\s+version)?|(?:deluxe|expanded|special|anniversary)(?:\s+edition)?|live)\s*$",
    )
    .expect("album dash suffix pattern")
});

/// Bracketed guest credits on artist names: "(feat. X)", "[with Y]".
static ARTIST_CREDIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\(\[]\s*(?:feat\.?|ft\.?|featuring|with)\s[^\)\]]*[\)\]]")
        .expect("artist credit pattern")
});

/// Tokens that start a trailing guest credit on an artist name.
const FEATURING_TOKENS: &[&str] = &["feat", "ft", "featuring"];

/// Normalizer for artist names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistNormalizer;

impl TextNormalizer for ArtistNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let key = canonicalize(raw, &[&ARTIST_CREDIT]);
        // "artist feat guest" -> "artist"; a leading token is part of the name
        let tokens: Vec<&str> = key.split(' ').collect();
        let end = tokens
            .iter()
            .skip(1)
            .position(|token| FEATURING_TOKENS.contains(token))
            .map_or(tokens.len(), |index| index + 1);
        tokens[..end].join(" ")
    }
}

/// Normalizer for album titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbumNormalizer;

impl TextNormalizer for AlbumNormalizer {
    fn normalize(&self, raw: &str) -> String {
        canonicalize(raw, &[&ALBUM_ANNOTATION, &ALBUM_DASH_SUFFIX])
    }
}

/// Shared pipeline; `rules` run after folding and before punctuation cleanup.
fn canonicalize(raw: &str, rules: &[&Regex]) -> String {
    let mut text: String = raw
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    for rule in rules {
        if rule.is_match(&text) {
            text = rule.replace_all(&text, " ").into_owned();
        }
    }

    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => cleaned.push_str(" and "),
            '\'' | '\u{2018}' | '\u{2019}' | '`' => {}
            c if c.is_alphanumeric() => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
