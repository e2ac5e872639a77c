//! The catalog lookup trait.

use async_trait::async_trait;
use farmhand_core::{CatalogKind, CatalogRecord, ItemId, Result};

/// Read access to an item catalog.
///
/// Implementations own their timeout and retry policy; callers treat every
/// error as final.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one record. Returns `FarmhandError::NotFound` if the catalog has
    /// no record of that kind with that id.
    async fn fetch_item(&self, kind: CatalogKind, id: ItemId) -> Result<CatalogRecord>;

    /// Records of a kind whose name starts with the prefix.
    async fn search_items(&self, kind: CatalogKind, name_prefix: &str) -> Result<Vec<CatalogRecord>>;

    /// Where records come from, for status reporting.
    fn source(&self) -> String {
        "custom".to_string()
    }
}
