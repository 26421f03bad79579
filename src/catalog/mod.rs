//! iTunes Search API integration
//!
//! Searches the catalog for albums. No API key required, but the service
//! throttles aggressively; see [`crate::fetch`].

pub mod dto;
mod client;

pub use client::{CatalogQueryClient, search_term};
pub use dto::{CatalogEntry, CatalogResult, StructuralError};
