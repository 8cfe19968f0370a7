//! Turn the final collector into the result table.
//!
//! The output has `min(budget, buckets)` rows. Buckets are drained from the wanted end
//! (largest key for Top, smallest for Bottom) and each contributes its rows in stored
//! order until the output is full; a bucket that does not fit is cut short and the rest
//! of it is dropped.

use crate::collector::Collector;
use crate::config::TieOrder;
use crate::frame::{TopNFrame, ValueColumn};
use crate::request::Direction;
use crate::scalar::ScalarKey;

/// Write up to `budget` ranked rows of `collector` into a new frame.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn materialize<K: ScalarKey>(
    mut collector: Collector<K>,
    budget: u64,
    direction: Direction,
    tie_order: TieOrder,
    names: [String; 2],
) -> TopNFrame {
    // bucket count, not row count
    let actual = budget.min(collector.len() as u64) as usize;

    let mut row_indices = vec![0u64; actual];
    let mut values = ValueColumn::zeroed(K::REPR, actual);

    let mut written = 0usize;
    while written < actual {
        let Some((key, mut bucket)) = collector.pop_extreme(direction) else {
            break;
        };
        if tie_order == TieOrder::RowIndex {
            bucket.sort_rows();
        }
        let value = key.to_scalar();
        for &row in bucket.rows().iter().take(actual - written) {
            row_indices[written] = row;
            values.set(written, value);
            written += 1;
        }
    }

    TopNFrame::new(names, row_indices, values)
}
