//! Two-tier search for articles that are related to an edited article and
//! need attention.
//!
//! Tier 1 walks the marker categories in order and collects articles that
//! carry the marker *and* share a non-marker category with the base
//! article. Only when that finds nothing does tier 2 take any article that
//! carries any marker.

use super::sampler::sample_with;
use crate::item::ItemId;
use crate::markers::MarkerSet;
use crate::storage::{CategoryStore, StorageResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// How far tier 1 searches before it stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Stop after the first marker that brings the pool to the display limit.
    /// Later markers are never queried, so their articles are not eligible.
    #[default]
    EarlyStop,
    /// Query every marker, then cap.
    Exhaustive,
}

/// Limits the engine works with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Most candidates kept for sampling
    pub pool_limit: usize,
    /// Most articles returned
    pub display_limit: usize,
    pub search_policy: SearchPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_limit: 50,
            display_limit: 3,
            search_policy: SearchPolicy::EarlyStop,
        }
    }
}

/// Candidates found by one search, before sampling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    /// Deduplicated, in discovery order unless the pool cap applied
    pub ids: Vec<ItemId>,
    /// True when the pool came from tier 1
    pub similar: bool,
}

/// Outcome of one recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub ids: Vec<ItemId>,
    /// True for topically related articles, false for the marker-only fallback
    pub similar: bool,
}

/// Order-preserving set used while collecting candidates
#[derive(Default)]
struct Candidates {
    ids: Vec<ItemId>,
    seen: HashSet<ItemId>,
}

impl Candidates {
    fn extend(&mut self, found: BTreeSet<ItemId>, base: ItemId) {
        for id in found {
            if id != base && self.seen.insert(id) {
                self.ids.push(id);
            }
        }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub struct RecommendationEngine {
    store: Arc<dyn CategoryStore>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn CategoryStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend up to `display_limit` articles for `base`.
    ///
    /// `Ok(None)` when markers are disabled or nothing qualifies. Store
    /// failures are returned as errors.
    pub fn recommend(&self, base: ItemId, markers: Option<&MarkerSet>) -> StorageResult<Option<Recommendation>> {
        self.recommend_with_rng(base, markers, &mut rand::thread_rng())
    }

    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        base: ItemId,
        markers: Option<&MarkerSet>,
        rng: &mut R,
    ) -> StorageResult<Option<Recommendation>> {
        let Some(markers) = markers else {
            return Ok(None);
        };

        let Some(pool) = self.candidates_with_rng(base, markers, rng)? else {
            debug!(%base, "no candidates in either tier");
            return Ok(None);
        };

        let ids = sample_with(&pool.ids, self.config.display_limit, rng);
        if ids.is_empty() {
            return Ok(None);
        }

        debug!(%base, similar = pool.similar, pool = pool.ids.len(), shown = ids.len(), "recommendation ready");
        Ok(Some(Recommendation {
            ids,
            similar: pool.similar,
        }))
    }

    /// Run both tiers and return the capped pool, or `None` if both are empty.
    pub fn candidates(&self, base: ItemId, markers: &MarkerSet) -> StorageResult<Option<CandidatePool>> {
        self.candidates_with_rng(base, markers, &mut rand::thread_rng())
    }

    /// Like [`RecommendationEngine::candidates`]. A pool over `pool_limit`
    /// is cut down by a random draw, so every candidate stays reachable.
    pub fn candidates_with_rng<R: Rng + ?Sized>(
        &self,
        base: ItemId,
        markers: &MarkerSet,
        rng: &mut R,
    ) -> StorageResult<Option<CandidatePool>> {
        let base_categories = self.base_categories(base, markers)?;

        let mut similar = true;
        let mut found = self.topical_candidates(base, markers, &base_categories)?;

        if found.is_empty() {
            found = self.fallback_candidates(base, markers)?;
            similar = false;
            if found.is_empty() {
                return Ok(None);
            }
        }

        let mut ids = found.ids;
        if ids.len() > self.config.pool_limit {
            debug!(%base, found = ids.len(), limit = self.config.pool_limit, "capping candidate pool");
            ids = ids.choose_multiple(rng, self.config.pool_limit).copied().collect();
        }
        if ids.is_empty() {
            return Ok(None);
        }

        Ok(Some(CandidatePool { ids, similar }))
    }

    /// Categories of `base` that are not markers
    pub fn base_categories(&self, base: ItemId, markers: &MarkerSet) -> StorageResult<BTreeSet<String>> {
        let mut categories = self.store.categories_of(base)?;
        categories.retain(|c| !markers.contains(c));
        Ok(categories)
    }

    /// Tier 1: marker ∧ shared base category
    fn topical_candidates(
        &self,
        base: ItemId,
        markers: &MarkerSet,
        base_categories: &BTreeSet<String>,
    ) -> StorageResult<Candidates> {
        let mut found = Candidates::default();

        // Nothing to intersect against; every per-marker query would be empty
        if base_categories.is_empty() {
            debug!(%base, "base article has no topical categories");
            return Ok(found);
        }

        for marker in markers.iter() {
            if self.config.search_policy == SearchPolicy::EarlyStop && found.len() >= self.config.display_limit {
                break;
            }
            let items = self.store.items_with_category_and_any_of(marker, base_categories)?;
            debug!(%base, marker, hits = items.len(), "tier 1 marker query");
            found.extend(items, base);
        }

        Ok(found)
    }

    /// Tier 2: any marker
    fn fallback_candidates(&self, base: ItemId, markers: &MarkerSet) -> StorageResult<Candidates> {
        let mut found = Candidates::default();
        let items = self.store.items_with_any_of_categories(markers.as_slice())?;
        debug!(%base, hits = items.len(), "tier 2 fallback query");
        found.extend(items, base);
        Ok(found)
    }
}
