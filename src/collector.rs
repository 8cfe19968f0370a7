//! Bounded ordered collector.
//!
//! A [`Collector`] maps each distinct key to the [`ValueBucket`] of rows holding it, kept
//! sorted by key. Three operations make up the selection algorithm:
//!
//! - [`insert`](Collector::insert) -- local collection, one present row at a time.
//! - [`trim`](Collector::trim) -- evict buckets from the unwanted end until at most
//!   `budget` buckets remain. The same routine runs after local collection and after
//!   every merge, and only ever looks at keys.
//! - [`absorb`](Collector::absorb) -- union another collector into this one. A key present
//!   on both sides keeps *both* row sequences (this side's rows first), so merging is
//!   associative and commutative in its bucket set and no row is lost.
//!
//! The budget bounds the number of distinct buckets, not rows. A collector holding many
//! duplicates may cover more rows than the budget.

use crate::bucket::ValueBucket;
use crate::request::Direction;
use log::trace;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Key-ordered buckets of row indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collector<K> {
    buckets: BTreeMap<K, ValueBucket>,
}

impl<K> Default for Collector<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Collector<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `row` holds `key`.
    #[inline]
    pub fn insert(&mut self, key: K, row: u64) {
        match self.buckets.entry(key) {
            Entry::Occupied(mut e) => e.get_mut().push(row),
            Entry::Vacant(e) => {
                e.insert(ValueBucket::new(row));
            }
        }
    }

    /// Evict buckets until at most `budget` remain, returning how many were evicted.
    ///
    /// `Top` drops the smallest keys, `Bottom` drops the largest.
    pub fn trim(&mut self, budget: u64, direction: Direction) -> usize {
        let mut evicted = 0usize;
        while self.buckets.len() as u64 > budget {
            let dropped = match direction {
                Direction::Top => self.buckets.pop_first(),
                Direction::Bottom => self.buckets.pop_last(),
            };
            if dropped.is_none() {
                break;
            }
            evicted += 1;
        }
        if evicted > 0 {
            trace!("trim({direction:?}, budget={budget}) evicted {evicted} bucket(s)");
        }
        evicted
    }

    /// Union `other` into `self`. Colliding keys concatenate their rows.
    pub fn absorb(&mut self, other: Self) {
        if self.buckets.is_empty() {
            self.buckets = other.buckets;
            return;
        }
        for (key, bucket) in other.buckets {
            match self.buckets.entry(key) {
                Entry::Occupied(mut e) => e.get_mut().append(bucket),
                Entry::Vacant(e) => {
                    e.insert(bucket);
                }
            }
        }
    }

    /// Remove and return the most wanted bucket: largest key for `Top`, smallest for `Bottom`.
    pub fn pop_extreme(&mut self, direction: Direction) -> Option<(K, ValueBucket)> {
        match direction {
            Direction::Top => self.buckets.pop_last(),
            Direction::Bottom => self.buckets.pop_first(),
        }
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total rows across all buckets.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.buckets.values().map(ValueBucket::len).sum()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ValueBucket)> + '_ {
        self.buckets.iter()
    }

    pub fn get(&self, key: &K) -> Option<&ValueBucket> {
        self.buckets.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(pairs: &[(i64, u64)]) -> Collector<i64> {
        let mut c = Collector::new();
        for &(k, r) in pairs {
            c.insert(k, r);
        }
        c
    }

    #[test]
    fn insert_groups_duplicates_in_discovery_order() {
        let c = collect(&[(10, 0), (10, 1), (5, 2), (5, 3), (5, 4), (1, 5)]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.row_count(), 6);
        assert_eq!(c.get(&5).map(ValueBucket::rows), Some(&[2u64, 3, 4][..]));
        assert_eq!(c.keys().copied().collect::<Vec<_>>(), vec![1, 5, 10]);
    }

    #[test]
    fn trim_top_drops_smallest_keys() {
        let mut c = collect(&[(3, 0), (1, 1), (4, 2), (1, 3), (5, 4), (9, 5)]);
        assert_eq!(c.trim(2, Direction::Top), 3);
        assert_eq!(c.keys().copied().collect::<Vec<_>>(), vec![5, 9]);
    }

    #[test]
    fn trim_bottom_drops_largest_keys() {
        let mut c = collect(&[(3, 0), (1, 1), (4, 2), (1, 3), (5, 4), (9, 5)]);
        c.trim(2, Direction::Bottom);
        assert_eq!(c.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        // bucket for 1 still carries both rows
        assert_eq!(c.get(&1).map(ValueBucket::len), Some(2));
    }

    #[test]
    fn trim_to_zero_empties() {
        let mut c = collect(&[(1, 0), (2, 1)]);
        c.trim(0, Direction::Top);
        assert!(c.is_empty());
        assert_eq!(c.trim(0, Direction::Bottom), 0);
    }

    #[test]
    fn absorb_unions_colliding_keys() {
        let mut a = collect(&[(7, 0), (3, 1)]);
        let b = collect(&[(7, 10), (8, 11)]);
        a.absorb(b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.get(&7).map(ValueBucket::rows), Some(&[0u64, 10][..]));
    }

    #[test]
    fn absorb_into_empty_takes_other() {
        let mut a = Collector::new();
        a.absorb(collect(&[(2, 4)]));
        assert_eq!(a.get(&2).map(ValueBucket::rows), Some(&[4u64][..]));
    }

    #[test]
    fn pop_extreme_follows_direction() {
        let mut c = collect(&[(2, 0), (8, 1), (5, 2)]);
        assert_eq!(c.pop_extreme(Direction::Top).map(|(k, _)| k), Some(8));
        assert_eq!(c.pop_extreme(Direction::Bottom).map(|(k, _)| k), Some(2));
        assert_eq!(c.pop_extreme(Direction::Top).map(|(k, _)| k), Some(5));
        assert!(c.pop_extreme(Direction::Top).is_none());
    }
}
