//! Memoized range-sum queries over a mutable array
//!
//! Cached sums are keyed by their inclusive `(l, r)` bounds and stay
//! valid only while no element inside the range changes; every point
//! update purges the covering entries before it returns.

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Range-sum query/update service backed by an LRU cache.
///
/// For every `(l, r)` key present in the cache, the cached value equals
/// the true current sum of `values[l..=r]`; `update` enforces this by
/// invalidating every cached range covering the written index.
pub struct RangeSum {
    /// The underlying array
    values: Vec<i64>,

    /// Memoized sums keyed by inclusive bounds
    cache: LruCache<(usize, usize), i64>,

    /// Hit/miss/invalidation counters
    stats: CacheStats,
}

impl RangeSum {
    /// Create a service over `values` with the given cache capacity.
    ///
    /// # Errors
    /// Returns [`Error::ZeroCapacity`] for capacity 0.
    pub fn new(values: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self {
            values,
            cache: LruCache::new(capacity)?,
            stats: CacheStats::new(),
        })
    }

    /// Sum of `values[l..=r]`, served from cache when possible.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] when `l > r` or `r` is past the
    /// end of the array.
    pub fn range_sum(&mut self, l: usize, r: usize) -> Result<i64> {
        let len = self.values.len();
        if l > r || r >= len {
            return Err(Error::InvalidRange { l, r, len });
        }

        if let Some(&sum) = self.cache.get(&(l, r)) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        let sum = self.values[l..=r].iter().sum();

        if self.cache.put((l, r), sum) {
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        Ok(sum)
    }

    /// Write `value` at `index`, purging every cached range that covers
    /// it. Nothing is recomputed eagerly; later queries repopulate.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] when `index` is past the end
    /// of the array.
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        let len = self.values.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        self.values[index] = value;
        let dropped = self.cache.invalidate_covering(index);
        self.stats.record_invalidations(dropped as u64);

        Ok(())
    }

    /// Length of the underlying array
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the underlying array is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current array contents
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of ranges currently cached
    pub fn cached_ranges(&self) -> usize {
        self.cache.len()
    }

    /// Cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_sum_basic() {
        let mut service = RangeSum::new(vec![1, 2, 3, 4, 5], 10).unwrap();

        assert_eq!(service.range_sum(0, 2).unwrap(), 6);
        assert_eq!(service.range_sum(0, 4).unwrap(), 15);
        assert_eq!(service.range_sum(3, 3).unwrap(), 4);
    }

    #[test]
    fn test_hit_skips_recomputation() {
        let mut service = RangeSum::new(vec![1, 2, 3, 4, 5], 10).unwrap();

        service.range_sum(1, 3).unwrap();
        service.range_sum(1, 3).unwrap();

        assert_eq!(service.stats().misses(), 1);
        assert_eq!(service.stats().hits(), 1);
    }

    #[test]
    fn test_update_invalidates_covering_range() {
        let mut service = RangeSum::new(vec![1, 2, 3, 4, 5], 10).unwrap();

        assert_eq!(service.range_sum(0, 2).unwrap(), 6);
        service.update(1, 10).unwrap();
        assert_eq!(service.range_sum(0, 2).unwrap(), 14);

        // Both queries were misses: the update dropped the cached sum
        assert_eq!(service.stats().misses(), 2);
        assert_eq!(service.stats().invalidations(), 1);
    }

    #[test]
    fn test_update_keeps_disjoint_ranges() {
        let mut service = RangeSum::new(vec![1, 2, 3, 4, 5], 10).unwrap();

        service.range_sum(0, 1).unwrap();
        service.range_sum(3, 4).unwrap();
        service.update(2, 100).unwrap();

        assert_eq!(service.cached_ranges(), 2);
        assert_eq!(service.range_sum(0, 1).unwrap(), 3);
        assert_eq!(service.range_sum(3, 4).unwrap(), 9);
        assert_eq!(service.stats().hits(), 2);
    }

    #[test]
    fn test_eviction_stats_follow_cache() {
        let mut service = RangeSum::new(vec![1, 2, 3, 4, 5], 1).unwrap();

        service.range_sum(0, 1).unwrap(); // fills the cache, no eviction
        assert_eq!(service.stats().evictions(), 0);

        service.range_sum(2, 3).unwrap(); // displaces (0, 1)
        assert_eq!(service.stats().evictions(), 1);

        // Invalidation empties the cache, so the next miss fills a free
        // slot instead of evicting
        service.update(3, 9).unwrap();
        service.range_sum(0, 1).unwrap();
        assert_eq!(service.stats().evictions(), 1);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut service = RangeSum::new(vec![1, 2, 3], 10).unwrap();

        assert_eq!(
            service.range_sum(2, 1),
            Err(Error::InvalidRange { l: 2, r: 1, len: 3 })
        );
        assert_eq!(
            service.range_sum(0, 3),
            Err(Error::InvalidRange { l: 0, r: 3, len: 3 })
        );
    }

    #[test]
    fn test_out_of_bounds_update_rejected() {
        let mut service = RangeSum::new(vec![1, 2, 3], 10).unwrap();

        assert_eq!(
            service.update(3, 0),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        );
        // Array untouched
        assert_eq!(service.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_cache_transparency_under_updates() {
        let mut service = RangeSum::new((1..=20).collect(), 4).unwrap();

        // Interleave queries and updates; every answer must match a
        // from-scratch sum over the current array.
        let script = [(0usize, 9usize), (5, 14), (0, 9), (10, 19), (3, 7)];
        for (step, &(l, r)) in script.iter().enumerate() {
            let got = service.range_sum(l, r).unwrap();
            let want: i64 = service.values()[l..=r].iter().sum();
            assert_eq!(got, want);

            service.update((step * 3) % 20, (step as i64 + 1) * 100).unwrap();
        }

        let got = service.range_sum(0, 19).unwrap();
        let want: i64 = service.values().iter().sum();
        assert_eq!(got, want);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            RangeSum::new(vec![1], 0).err(),
            Some(Error::ZeroCapacity)
        );
    }
}
