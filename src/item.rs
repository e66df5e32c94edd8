//! Item identifiers and resolved page titles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace of ordinary articles
pub const MAIN_NAMESPACE: i32 = 0;

/// Stable numeric identifier of an item (page id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A page as the title resolver sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTitle {
    pub id: ItemId,
    pub namespace: i32,
    /// Title in database form (underscores, no namespace prefix)
    pub title: String,
}

impl PageTitle {
    pub fn new(id: ItemId, namespace: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            namespace,
            title: title.into(),
        }
    }

    /// Subpages carry a `/` in their title
    pub fn is_subpage(&self) -> bool {
        self.title.contains('/')
    }

    /// Human-readable form: underscores shown as spaces
    pub fn display_text(&self) -> String {
        self.title.replace('_', " ")
    }
}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subpage_detection() {
        assert!(PageTitle::new(ItemId(1), 0, "Rust/Ownership").is_subpage());
        assert!(!PageTitle::new(ItemId(2), 0, "Rust").is_subpage());
    }

    #[test]
    fn test_display_text_uses_spaces() {
        let page = PageTitle::new(ItemId(3), 0, "Borrow_checker");
        assert_eq!(page.to_string(), "Borrow checker");
    }

    #[test]
    fn test_item_id_serializes_as_number() {
        let json = serde_json::to_string(&ItemId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
