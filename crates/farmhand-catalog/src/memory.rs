//! In-memory catalog.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use farmhand_core::{CatalogKind, CatalogRecord, FarmhandError, ItemId, Result};
use tokio::sync::RwLock;

use crate::store::Catalog;

/// Catalog backed by a map of records.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    records: Arc<RwLock<HashMap<(CatalogKind, ItemId), CatalogRecord>>>,

    /// Number of `fetch_item` calls served, found or not.
    lookups: Arc<AtomicUsize>,

    /// Number of `search_items` calls served.
    searches: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given records.
    pub fn with_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| ((r.kind(), r.id()), r))
            .collect();

        Self {
            records: Arc::new(RwLock::new(records)),
            lookups: Arc::new(AtomicUsize::new(0)),
            searches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Insert or replace a record.
    pub async fn insert(&self, record: CatalogRecord) {
        let mut records = self.records.write().await;
        records.insert((record.kind(), record.id()), record);
    }

    /// Remove a record, returning it if present.
    pub async fn remove(&self, kind: CatalogKind, id: ItemId) -> Option<CatalogRecord> {
        let mut records = self.records.write().await;
        records.remove(&(kind, id))
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Number of fetches served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of searches served so far.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn fetch_item(&self, kind: CatalogKind, id: ItemId) -> Result<CatalogRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let records = self.records.read().await;
        records
            .get(&(kind, id))
            .cloned()
            .ok_or(FarmhandError::NotFound { kind, id })
    }

    async fn search_items(&self, kind: CatalogKind, name_prefix: &str) -> Result<Vec<CatalogRecord>> {
        self.searches.fetch_add(1, Ordering::SeqCst);

        let prefix = name_prefix.to_lowercase();
        let records = self.records.read().await;

        let mut hits: Vec<CatalogRecord> = records
            .values()
            .filter(|r| r.kind() == kind && r.name().to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        hits.sort_by_key(|r| r.id());

        Ok(hits)
    }

    fn source(&self) -> String {
        "in-memory".to_string()
    }
}
