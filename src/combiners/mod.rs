//! Built-in combiners.
//!
//! - [`ExtremeRows<K>`] -- the `budget` most extreme distinct values of a numeric column,
//!   with every row that holds them, materialized into a ranked two-column frame.
//!
//! Combiners implement [`CombineFn`](crate::combine::CombineFn) and are driven by the
//! [`Runner`](crate::runner::Runner).

mod extreme;

pub use extreme::{ExtremeRows, PresentRows};
