//! EditSimilar: suggest articles to work on right after an edit
//!
//! After a user saves an article, the engine looks for other articles that
//! share a topical category with it and are flagged as needing attention
//! (stubs, cleanup, ...). When none share a topic it falls back to any
//! flagged article.
//!
//! # Core Concepts
//!
//! - **Marker categories**: operator-curated categories that flag work to do
//! - **Tier 1**: articles with a marker and a category in common with the edit
//! - **Tier 2**: articles with any marker
//! - **Throttle**: show the suggestion only every N edits per session
//!
//! # Example
//!
//! ```
//! use editsimilar::{EngineConfig, ItemId, MarkerRegistry, OpenStore, RecommendationEngine, SqliteStore};
//! use std::sync::Arc;
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! store.add_categories(ItemId(1), &["Rust"]).unwrap();
//! store.add_categories(ItemId(2), &["Rust", "Stub articles"]).unwrap();
//!
//! let markers = MarkerRegistry::load(Some("* Stub articles"));
//! let engine = RecommendationEngine::new(Arc::new(store), EngineConfig::default());
//! let rec = engine.recommend(ItemId(1), markers.as_ref()).unwrap().unwrap();
//! assert!(rec.similar);
//! assert_eq!(rec.ids, vec![ItemId(2)]);
//! ```

pub mod config;
pub mod hooks;
mod item;
pub mod markers;
pub mod recommend;
mod session;
pub mod storage;
pub mod titles;

pub use config::{Config, ConfigError};
pub use hooks::{EditHooks, Notice, PageView, SaveEvent, UserContext};
pub use item::{ItemId, PageTitle, MAIN_NAMESPACE};
pub use markers::{normalize_category, MarkerRegistry, MarkerSet};
pub use recommend::{
    CandidatePool, DisplayThrottle, EngineConfig, Recommendation, RecommendationEngine, SearchPolicy,
};
pub use session::SessionState;
pub use storage::{CategoryStore, OpenStore, SqliteStore, StorageError, StorageResult, TitleResolver};
pub use titles::TitlePolicy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
