//! Testing utilities for selection results.
//!
//! - [`assert_rank_order`] -- values are non-increasing (Top) or non-decreasing (Bottom).
//! - [`assert_rows_valid`] -- every output row index exists in the source column, is not
//!   missing there, appears once, and carries the source value.
//! - [`shuffled_ints`] / [`with_gaps`] -- deterministic fixture data.
//!
//! These panic with a descriptive message on failure, like `assert_eq!`.

use crate::frame::TopNFrame;
use crate::request::Direction;
use crate::scalar::Scalar;
use crate::store::{Column, ColumnChunk};
use std::collections::{HashMap, HashSet};

/// Assert that the frame's values follow `direction`.
///
/// # Panics
/// Panics at the first pair of rows that is out of order.
pub fn assert_rank_order(frame: &TopNFrame, direction: Direction) {
    let values: Vec<f64> = frame.rows().map(|(_, v)| v.as_f64()).collect();
    for (i, pair) in values.windows(2).enumerate() {
        let ok = match direction {
            Direction::Top => pair[0] >= pair[1],
            Direction::Bottom => pair[0] <= pair[1],
        };
        assert!(
            ok,
            "{direction} order violated at rows {i}..{}: {} then {}\n  values: {values:?}",
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

/// Assert that every output row refers to a distinct, present row of `column` holding
/// the reported value.
///
/// # Panics
/// Panics on a duplicate, unknown, or missing row, or on a value mismatch.
#[allow(clippy::float_cmp)]
pub fn assert_rows_valid<C: Column>(frame: &TopNFrame, column: &C) {
    let chunks = column.chunks().expect("column chunks");
    let mut source: HashMap<u64, Option<(i64, f64)>> = HashMap::new();
    for chunk in &chunks {
        for offset in 0..chunk.len() {
            let present = (!chunk.is_missing(offset))
                .then(|| (chunk.at_i64(offset), chunk.at_f64(offset)));
            source.insert(chunk.row_index(offset), present);
        }
    }

    let mut seen = HashSet::new();
    for (row, value) in frame.rows() {
        assert!(seen.insert(row), "row {row} emitted more than once");
        let entry = source
            .get(&row)
            .unwrap_or_else(|| panic!("row {row} does not exist in `{}`", column.name()));
        let (as_int, as_float) =
            entry.unwrap_or_else(|| panic!("row {row} is missing in `{}`", column.name()));
        match value {
            Scalar::Int64(v) => assert_eq!(v, as_int, "value mismatch at row {row}"),
            Scalar::Float64(v) => assert!(
                v == as_float,
                "value mismatch at row {row}: {v} vs {as_float}"
            ),
        }
    }
}

/// `n` distinct integers `0..n` in a seed-dependent order.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn shuffled_ints(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = SplitMix64::new(seed);
    let mut v: Vec<i64> = (0..n as i64).collect();
    // Fisher-Yates
    for i in (1..v.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        v.swap(i, j);
    }
    v
}

/// Wrap values in `Some`, replacing every `every`-th one (starting at index 0) with `None`.
#[must_use]
pub fn with_gaps(values: &[i64], every: usize) -> Vec<Option<i64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (every == 0 || i % every != 0).then_some(v))
        .collect()
}

#[derive(Clone, Copy, Debug)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    const fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
