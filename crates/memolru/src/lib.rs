//! # memolru
//!
//! Fixed-capacity LRU cache with interval-aware invalidation.
//!
//! ## Architecture
//! - **HashMap**: AHash for fast lookups (O(1))
//! - **LRU List**: arena-backed doubly-linked list for eviction (O(1))
//! - **Range layer**: memoized range-sum queries over a mutable array,
//!   with point updates purging every cached range they touch
//!
//! ## Concurrency
//! Single-threaded. `get` updates recency and therefore takes
//! `&mut self`; nothing here locks. Callers that share a cache across
//! threads must provide their own mutual exclusion.

#![warn(missing_docs)]

mod error;
mod lru;
mod range;
mod stats;

pub use error::{Error, Result};
pub use lru::{Cover, LruCache};
pub use range::RangeSum;
pub use stats::CacheStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_and_service_compose() {
        let mut service = RangeSum::new(vec![1, 2, 3], 4).unwrap();
        assert_eq!(service.range_sum(0, 2).unwrap(), 6);
    }
}
