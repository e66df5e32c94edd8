//! Host-facing hooks: remember a qualifying save, then decide what to show
//! on the next article view.
//!
//! The host calls [`EditHooks::on_save`] when an edit is stored and
//! [`EditHooks::on_page_view`] while building the next page. Rendering the
//! returned [`Notice`] is up to the host.

use crate::config::Config;
use crate::item::{ItemId, PageTitle};
use crate::markers::MarkerRegistry;
use crate::recommend::{DisplayThrottle, RecommendationEngine};
use crate::session::SessionState;
use crate::storage::{CategoryStore, StorageResult, TitleResolver};
use crate::titles::TitlePolicy;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// The user behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub name: String,
    /// Logged in, as opposed to anonymous
    pub registered: bool,
    /// The user's own opt-out switch
    pub suggestions_enabled: bool,
}

impl UserContext {
    pub fn registered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registered: true,
            suggestions_enabled: true,
        }
    }

    pub fn anonymous(address: impl Into<String>) -> Self {
        Self {
            name: address.into(),
            registered: false,
            suggestions_enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveEvent {
    pub page: ItemId,
    pub namespace: i32,
    pub user: UserContext,
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub page: ItemId,
    /// Plain article view (not history, diff, edit form, ...)
    pub is_article_view: bool,
    pub user: UserContext,
}

/// What the host should show after an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    None,
    /// Related articles that need attention
    Similar { titles: Vec<PageTitle> },
    /// Articles that need attention, unrelated to the edit
    NeedsAttention { titles: Vec<PageTitle> },
    /// Plain thank-you when there is nothing to suggest
    Thanks { user: String },
}

impl Notice {
    pub fn is_none(&self) -> bool {
        matches!(self, Notice::None)
    }

    pub fn titles(&self) -> &[PageTitle] {
        match self {
            Notice::Similar { titles } | Notice::NeedsAttention { titles } => titles,
            Notice::None | Notice::Thanks { .. } => &[],
        }
    }

    /// Registered users get a link to switch suggestions off
    pub fn offers_preferences_link(&self, user: &UserContext) -> bool {
        !self.is_none() && user.registered
    }
}

pub struct EditHooks<S> {
    store: Arc<S>,
    engine: RecommendationEngine,
    throttle: DisplayThrottle,
    titles: TitlePolicy,
    config: Config,
}

impl<S> EditHooks<S>
where
    S: CategoryStore + TitleResolver + 'static,
{
    pub fn new(store: Arc<S>, config: Config) -> Self {
        let engine = RecommendationEngine::new(store.clone(), config.engine());
        Self {
            store,
            engine,
            throttle: config.throttle(),
            titles: config.title_policy(),
            config,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Flag the session when a user who wants suggestions saves an article
    pub fn on_save(&self, session: &mut SessionState, event: &SaveEvent) {
        if event.user.suggestions_enabled && self.config.is_content_namespace(event.namespace) {
            debug!(page = %event.page, "edit qualifies for a suggestion");
            session.pending_suggestion = true;
        }
    }

    /// Build the notice for this view. Never fails: store errors are logged
    /// and produce no notice.
    pub fn on_page_view(&self, session: &mut SessionState, view: &PageView, markers_text: Option<&str>) -> Notice {
        match self.try_on_page_view(session, view, markers_text) {
            Ok(notice) => notice,
            Err(e) => {
                warn!(page = %view.page, error = %e, "edit suggestion failed");
                Notice::None
            }
        }
    }

    /// Like [`EditHooks::on_page_view`], returning store errors to the caller
    pub fn try_on_page_view(
        &self,
        session: &mut SessionState,
        view: &PageView,
        markers_text: Option<&str>,
    ) -> StorageResult<Notice> {
        if !(session.pending_suggestion && view.user.suggestions_enabled && view.is_article_view) {
            return Ok(Notice::None);
        }
        // Shown at most once per save
        session.pending_suggestion = false;

        if !self.throttle.should_display(session) {
            debug!(page = %view.page, "suggestion throttled");
            return Ok(Notice::None);
        }

        let markers = MarkerRegistry::load(markers_text);
        if let Some(rec) = self.engine.recommend(view.page, markers.as_ref())? {
            let titles = self.titles.filter(self.store.resolve(&rec.ids)?);
            if !titles.is_empty() {
                return Ok(if rec.similar {
                    Notice::Similar { titles }
                } else {
                    Notice::NeedsAttention { titles }
                });
            }
        }

        if view.user.registered && self.config.always_show_thanks {
            return Ok(Notice::Thanks {
                user: view.user.name.clone(),
            });
        }
        Ok(Notice::None)
    }
}
