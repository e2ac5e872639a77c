//! # Farmhand Catalog
//!
//! Item catalog lookup and search.
//!
//! [`Catalog`] is the seam the planner resolves requested items through.
//! [`MhwDbCatalog`] talks to the public mhw-db REST API;
//! [`InMemoryCatalog`] serves fixed records for tests and offline use.

pub mod http;
pub mod memory;
pub mod payload;
pub mod search;
pub mod store;

pub use http::{CatalogConfig, MhwDbCatalog};
pub use memory::InMemoryCatalog;
pub use search::{search_all, SearchHit};
pub use store::Catalog;
