//! Storage backends
//!
//! The engine reads the item ↔ category relation through the
//! `CategoryStore` trait and turns ids into titles through `TitleResolver`.
//! `SqliteStore` implements both.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{CategoryStore, OpenStore, StorageError, StorageResult, TitleResolver};
