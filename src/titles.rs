//! Which resolved pages may be shown to the user

use crate::item::{PageTitle, MAIN_NAMESPACE};

/// Keeps articles in content namespaces and, optionally, drops subpages.
///
/// Applied after sampling, so fewer titles than the display limit may
/// survive. Each page is judged on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePolicy {
    pub content_namespaces: Vec<i32>,
    pub exclude_subpages: bool,
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            content_namespaces: vec![MAIN_NAMESPACE],
            exclude_subpages: true,
        }
    }
}

impl TitlePolicy {
    pub fn admits(&self, page: &PageTitle) -> bool {
        self.content_namespaces.contains(&page.namespace) && !(self.exclude_subpages && page.is_subpage())
    }

    pub fn filter(&self, pages: Vec<PageTitle>) -> Vec<PageTitle> {
        pages.into_iter().filter(|p| self.admits(p)).collect()
    }
}
