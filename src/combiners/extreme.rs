//! Extreme-rows combiner: exact Top-N / Bottom-N rows by value.

use crate::collector::Collector;
use crate::combine::CombineFn;
use crate::config::TieOrder;
use crate::frame::TopNFrame;
use crate::materialize::materialize;
use crate::request::Direction;
use crate::scalar::ScalarKey;
use crate::store::ColumnChunk;
use std::marker::PhantomData;

/* ===================== ExtremeRows<K> ===================== */

/// Keeps the `budget` most extreme distinct values and every row holding them.
///
/// - Input: `(key, absolute row index)` pairs.
/// - Accumulator: [`Collector<K>`], trimmed to `budget` buckets after each partition
///   and after each merge.
/// - Output: the ranked [`TopNFrame`].
///
/// Merge unions colliding keys, so the retained bucket set does not depend on how
/// partitions are grouped or in which order they are merged.
#[derive(Clone, Debug)]
pub struct ExtremeRows<K> {
    pub budget: u64,
    pub direction: Direction,
    pub tie_order: TieOrder,
    names: [String; 2],
    _k: PhantomData<fn() -> K>,
}

impl<K> ExtremeRows<K> {
    /// `names` are the output column names: `[row-index label, value column name]`.
    #[must_use]
    pub const fn new(
        budget: u64,
        direction: Direction,
        tie_order: TieOrder,
        names: [String; 2],
    ) -> Self {
        Self {
            budget,
            direction,
            tie_order,
            names,
            _k: PhantomData,
        }
    }
}

impl<K: ScalarKey> CombineFn<(K, u64), Collector<K>, TopNFrame> for ExtremeRows<K> {
    fn create(&self) -> Collector<K> {
        Collector::new()
    }

    fn add_input(&self, acc: &mut Collector<K>, (key, row): (K, u64)) {
        acc.insert(key, row);
    }

    fn compact(&self, acc: &mut Collector<K>) {
        acc.trim(self.budget, self.direction);
    }

    fn merge(&self, acc: &mut Collector<K>, other: Collector<K>) {
        acc.absorb(other);
        acc.trim(self.budget, self.direction);
    }

    fn finish(&self, acc: Collector<K>) -> TopNFrame {
        materialize(
            acc,
            self.budget,
            self.direction,
            self.tie_order,
            self.names.clone(),
        )
    }
}

/* ===================== PresentRows ===================== */

/// Iterator over a chunk's present values as `(key, absolute row index)`.
///
/// Missing rows are skipped and never reach the collector.
pub struct PresentRows<K, C> {
    chunk: C,
    offset: usize,
    _k: PhantomData<fn() -> K>,
}

impl<K, C> PresentRows<K, C> {
    pub const fn new(chunk: C) -> Self {
        Self {
            chunk,
            offset: 0,
            _k: PhantomData,
        }
    }
}

impl<K: ScalarKey, C: ColumnChunk> Iterator for PresentRows<K, C> {
    type Item = (K, u64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.chunk.len() {
            let offset = self.offset;
            self.offset += 1;
            if self.chunk.is_missing(offset) {
                continue;
            }
            if let Some(key) = K::read(&self.chunk, offset) {
                return Some((key, self.chunk.row_index(offset)));
            }
        }
        None
    }
}
