//! Bounded random selection from a candidate pool

use crate::item::ItemId;
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw up to `limit` distinct candidates uniformly at random.
pub fn sample(candidates: &[ItemId], limit: usize) -> Vec<ItemId> {
    sample_with(candidates, limit, &mut rand::thread_rng())
}

/// Like [`sample`] with a caller-supplied random source.
///
/// A single candidate is returned as-is; otherwise `min(limit, n)` elements
/// are drawn without replacement in no particular order.
pub fn sample_with<R: Rng + ?Sized>(candidates: &[ItemId], limit: usize, rng: &mut R) -> Vec<ItemId> {
    if limit == 0 {
        return Vec::new();
    }

    match candidates {
        [] => Vec::new(),
        [only] => vec![*only],
        _ => candidates
            .choose_multiple(rng, limit.min(candidates.len()))
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ids(range: std::ops::Range<i64>) -> Vec<ItemId> {
        range.map(ItemId).collect()
    }

    #[test]
    fn test_singleton_returns_element() {
        let picked = sample(&[ItemId(7)], 3);
        assert_eq!(picked, vec![ItemId(7)]);
    }

    #[test]
    fn test_empty_pool() {
        assert!(sample(&[], 3).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        assert!(sample(&ids(0..5), 0).is_empty());
        assert!(sample(&[ItemId(1)], 0).is_empty());
    }

    #[test]
    fn test_draws_distinct_members_up_to_limit() {
        let pool = ids(0..20);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = sample_with(&pool, 3, &mut rng);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|id| pool.contains(id)));
        }
    }

    #[test]
    fn test_limit_larger_than_pool_takes_everything() {
        let pool = ids(0..2);
        let picked: HashSet<_> = sample(&pool, 5).into_iter().collect();
        assert_eq!(picked, pool.into_iter().collect());
    }

    #[test]
    fn test_every_candidate_reachable() {
        let pool = ids(0..6);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.extend(sample_with(&pool, 2, &mut rng));
        }
        assert_eq!(seen.len(), pool.len());
    }
}
