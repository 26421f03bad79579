//! iTunes Search API Data Transfer Objects
//!
//! Only the envelope is parsed eagerly. Entries stay as raw JSON and their
//! fields are checked when the selection scan actually reads them, so one
//! odd entry near the front of the list doesn't hide the rest of the
//! response.
//!
//! API Reference: https://performance-partners.apple.com/search-api

use serde::Deserialize;
use serde_json::Value;

/// Search response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogResult {
    /// Number of entries the catalog says it returned
    pub result_count: u32,
    /// Entries in catalog order
    pub results: Vec<CatalogEntry>,
}

impl CatalogResult {
    /// Treats a zero count as empty regardless of `results`.
    pub fn is_empty(&self) -> bool {
        self.result_count == 0
    }
}

/// A single album entry
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CatalogEntry(Value);

/// An entry is missing a field the selection needs, or has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("entry has no `{0}` field")]
    MissingField(&'static str),

    #[error("entry field `{0}` is not a string")]
    NotAString(&'static str),
}

impl CatalogEntry {
    pub fn artist_name(&self) -> Result<&str, StructuralError> {
        self.string_field("artistName")
    }

    pub fn collection_name(&self) -> Result<&str, StructuralError> {
        self.string_field("collectionName")
    }

    /// The 100px artwork URL
    pub fn artwork_url_small(&self) -> Result<&str, StructuralError> {
        self.string_field("artworkUrl100")
    }

    fn string_field(&self, name: &'static str) -> Result<&str, StructuralError> {
        let object = self.0.as_object().ok_or(StructuralError::NotAnObject)?;
        object
            .get(name)
            .ok_or(StructuralError::MissingField(name))?
            .as_str()
            .ok_or(StructuralError::NotAString(name))
    }
}

impl From<Value> for CatalogEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
