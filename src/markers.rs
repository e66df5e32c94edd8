//! Marker registry: which categories flag an article as needing attention.
//!
//! Operators curate the list as a block of text with one `*`-prefixed
//! entry per category:
//!
//! ```text
//! Categories whose articles need work:
//! * Stub articles
//! * Articles needing cleanup
//! ```
//!
//! Everything before the first `*` is preamble. A block consisting of just
//! `-` switches the feature off without deleting the list.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Text that disables the engine while keeping the list around
pub const DISABLE_SENTINEL: &str = "-";

/// Normalize a category name to its stored form: trimmed, spaces as underscores.
pub fn normalize_category(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Ordered, non-empty set of marker category names.
///
/// Order is the order in which the engine visits markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarkerSet {
    names: Vec<String>,
}

impl MarkerSet {
    /// Build from already-listed names. Names are normalized, blanks and
    /// repeats dropped. Returns `None` when nothing is left.
    pub fn new<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names: Vec<String> = names
            .into_iter()
            .map(|n| normalize_category(n.as_ref()))
            .filter(|n| !n.is_empty())
            .filter(|n| seen.insert(n.clone()))
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.names.iter().any(|n| n == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; an empty set is never constructed
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses the operator-maintained marker list.
pub struct MarkerRegistry;

impl MarkerRegistry {
    /// Parse marker text. `None` means the engine is disabled for this
    /// invocation: text absent, blank, the disable sentinel, or no entries.
    pub fn load(text: Option<&str>) -> Option<MarkerSet> {
        let Some(text) = text else {
            info!("marker list absent, suggestions disabled");
            return None;
        };

        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == DISABLE_SENTINEL {
            info!("marker list disabled");
            return None;
        }

        // First segment precedes any `*` and is never a category
        let markers = MarkerSet::new(text.split('*').skip(1));
        match &markers {
            Some(set) => debug!(count = set.len(), "loaded marker categories"),
            None => info!("marker list has no entries, suggestions disabled"),
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("  Stub articles "), "Stub_articles");
        assert_eq!(normalize_category("Already_normal"), "Already_normal");
    }

    #[test]
    fn test_load_discards_preamble() {
        let text = "Marker categories for EditSimilar\n* Stub articles\n* Cleanup\n";
        let set = MarkerRegistry::load(Some(text)).unwrap();
        assert_eq!(set.as_slice(), &["Stub_articles".to_string(), "Cleanup".to_string()]);
    }

    #[test]
    fn test_load_keeps_order() {
        let set = MarkerRegistry::load(Some("* Zeta\n* Alpha\n* Mid")).unwrap();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_load_is_idempotent() {
        let text = "intro\n* Stub articles\n*Needs  sources\n";
        let first = MarkerRegistry::load(Some(text));
        let second = MarkerRegistry::load(Some(text));
        assert_eq!(first, second);
        assert!(first.unwrap().contains("Needs__sources"));
    }

    #[test]
    fn test_disable_sentinel() {
        assert!(MarkerRegistry::load(Some("-")).is_none());
        assert!(MarkerRegistry::load(Some("  -\n")).is_none());
    }

    #[test]
    fn test_absent_or_blank_is_disabled() {
        assert!(MarkerRegistry::load(None).is_none());
        assert!(MarkerRegistry::load(Some("   \n")).is_none());
    }

    #[test]
    fn test_no_entries_is_disabled() {
        assert!(MarkerRegistry::load(Some("just a preamble, no stars")).is_none());
        assert!(MarkerRegistry::load(Some("preamble\n*\n*  \n")).is_none());
    }

    #[test]
    fn test_repeated_entries_collapse() {
        let set = MarkerRegistry::load(Some("* Stubs\n* Cleanup\n* Stubs")).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_marker_set_new_rejects_empty() {
        assert!(MarkerSet::new(Vec::<String>::new()).is_none());
        assert!(MarkerSet::new(["  "]).is_none());
    }
}
