//! Roman numeral to arabic digit conversion.
//!
//! Used as a fallback when a literal catalog query returns nothing: local tags
//! say "Final Fantasy VII" while the catalog says "Final Fantasy 7".

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Canonical spellings for 1..=20, indexed by value - 1.
const NUMERALS: [&str; 20] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx",
];

/// Whole-word runs of the letters that can spell 1..=20.
static NUMERAL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[ivx]+\b").expect("roman numeral pattern"));

/// Replaces standalone roman numerals (1 to 20) with arabic digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomanNumeralConverter;

impl RomanNumeralConverter {
    /// Convert every whole-word numeral in `text`. Other words, including
    /// non-canonical letter runs such as "iiii" or "vx", are left alone.
    pub fn convert_all(&self, text: &str) -> String {
        NUMERAL_WORD
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                match value_of(word) {
                    Some(value) => value.to_string(),
                    None => word.to_string(),
                }
            })
            .into_owned()
    }
}

fn value_of(word: &str) -> Option<usize> {
    let lower = word.to_ascii_lowercase();
    NUMERALS
        .iter()
        .position(|numeral| *numeral == lower)
        .map(|index| index + 1)
}
