//! # Ironrank
//!
//! **Exact Top-N / Bottom-N row selection** over a numeric column whose rows are split into
//! partitions processed in parallel. Given a percentage and a direction, ironrank returns a
//! two-column frame (original row index, value) holding the most extreme rows by value,
//! without approximation, while keeping per-partition memory bounded by the row budget.
//!
//! ## Quick Start
//!
//! ```
//! use ironrank::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let table = MemTable::new(vec![MemColumn::float64(
//!     "latency",
//!     vec![f64::NAN, 7.0, f64::NAN, 3.0, 9.0],
//! )])?;
//!
//! // budget = round(100% of 3 valid rows) = 3
//! let top = select_extreme_rows(&table, 0, 100.0, Direction::Top)?;
//! assert_eq!(top.row_indices(), &[4, 1, 3]);
//! assert_eq!(top.values().as_f64(), Some(&[9.0, 7.0, 3.0][..]));
//! # Ok(())
//! # }
//! ```
//!
//! ## How it works
//!
//! 1. **Local collection** -- every partition builds a [`Collector`]: an ordered map from
//!    each distinct value to the bucket of row indices holding it. Missing values are
//!    skipped. The collector is then trimmed to at most `budget` buckets, evicting from the
//!    unwanted end.
//! 2. **Reduction** -- collectors are merged pairwise (or in fanout-bounded rounds). A value
//!    present on both sides keeps both row lists, and the result is trimmed again, so the
//!    retained buckets do not depend on partitioning or merge order.
//! 3. **Materialization** -- the final collector is drained from the wanted end into
//!    `min(budget, buckets)` output rows.
//!
//! The row budget is `round(percentage * 0.01 * valid_rows)`. It bounds distinct values kept,
//! not rows: a heavily duplicated value can fill the output with a single value, and a
//! bucket that does not fit is cut short.
//!
//! ## Execution
//!
//! [`SelectOptions`] chooses between sequential and Rayon-parallel execution
//! ([`ExecMode`]), the merge fanout, the order of tied rows ([`TieOrder`]), and the name of
//! the row-index column. Options deserialize from JSON.
//!
//! ## Storage
//!
//! The core reads columns through the [`Table`] / [`Column`] / [`ColumnChunk`] traits;
//! [`MemTable`] is the in-memory implementation.
//!
//! ## Module Overview
//!
//! - [`select`] - Request validation, budget computation, and the selection pipeline
//! - [`collector`] - Bounded ordered collector: insert, trim, and union-merge
//! - [`combiners`] - The [`ExtremeRows`] combiner
//! - [`materialize`] - Collector to result frame
//! - [`runner`] - Sequential and parallel execution of combiners
//! - [`store`] - Columnar store traits and the in-memory store
//! - [`testing`] - Assertions and fixtures for selection results

pub mod bucket;
pub mod collector;
pub mod combine;
pub mod combiners;
pub mod config;
pub mod error;
pub mod frame;
pub mod materialize;
pub mod request;
pub mod runner;
pub mod scalar;
pub mod select;
pub mod store;
pub mod testing;

pub use bucket::ValueBucket;
pub use collector::Collector;
pub use combine::CombineFn;
pub use combiners::ExtremeRows;
pub use config::{SelectOptions, TieOrder};
pub use error::{Result, SelectError};
pub use frame::{TopNFrame, ValueColumn};
pub use request::{Direction, SelectRequest};
pub use runner::{ExecMode, Runner};
pub use scalar::{NumericRepr, Scalar, ScalarKey};
pub use select::{Selector, select_extreme_rows};
pub use store::{Column, ColumnChunk, ColumnType, MemColumn, MemTable, Table};
