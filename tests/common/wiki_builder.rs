//! Builds small wikis in an in-memory store for integration tests.

use editsimilar::{ItemId, OpenStore, PageTitle, SqliteStore};
use std::sync::Arc;

/// Fluent builder for a page/category fixture
#[derive(Default)]
pub struct WikiBuilder {
    pages: Vec<(i64, i32, String, Vec<String>)>,
}

impl WikiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Article in the main namespace with the given categories
    pub fn article(self, id: i64, title: &str, categories: &[&str]) -> Self {
        self.page(id, 0, title, categories)
    }

    pub fn page(mut self, id: i64, namespace: i32, title: &str, categories: &[&str]) -> Self {
        self.pages.push((
            id,
            namespace,
            title.to_string(),
            categories.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> Arc<SqliteStore> {
        let store = SqliteStore::open_in_memory().expect("in-memory store");
        for (id, namespace, title, categories) in self.pages {
            store
                .save_page(&PageTitle::new(ItemId(id), namespace, title))
                .expect("save page");
            store.add_categories(ItemId(id), &categories).expect("tag page");
        }
        Arc::new(store)
    }
}
