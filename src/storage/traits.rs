//! Storage trait definitions

use crate::item::{ItemId, PageTitle};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store connection lock poisoned")]
    LockPoisoned,

    #[error("Malformed data: {0}")]
    Malformed(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Read-only view of the item ↔ category relation.
///
/// Every query is side-effect free, so implementations may point at a
/// replica. Implementations must be thread-safe (Send + Sync).
pub trait CategoryStore: Send + Sync {
    /// All categories attached to an item
    fn categories_of(&self, item: ItemId) -> StorageResult<BTreeSet<String>>;

    /// All items tagged with a category
    fn items_with_category(&self, category: &str) -> StorageResult<BTreeSet<ItemId>>;

    /// Items tagged with `category` and with at least one of `any_of`
    fn items_with_category_and_any_of(
        &self,
        category: &str,
        any_of: &BTreeSet<String>,
    ) -> StorageResult<BTreeSet<ItemId>>;

    /// Items tagged with at least one of `categories`
    fn items_with_any_of_categories(&self, categories: &[String]) -> StorageResult<BTreeSet<ItemId>>;
}

/// Translates item ids into page titles.
///
/// Returns one record per id that exists; unknown ids are skipped.
/// Filtering (namespaces, subpages) is left to the caller.
pub trait TitleResolver: Send + Sync {
    fn resolve(&self, items: &[ItemId]) -> StorageResult<Vec<PageTitle>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
