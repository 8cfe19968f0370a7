//! The map/merge/finish protocol used to fold partitions.
//!
//! A [`CombineFn`] describes an associative aggregation in four steps:
//!
//! 1. `create` a fresh accumulator for a partition,
//! 2. `add_input` every element of that partition, then `compact` it once,
//! 3. `merge` accumulators pairwise in any grouping the runner chooses,
//! 4. `finish` the single surviving accumulator into the output.
//!
//! The [`Runner`](crate::runner::Runner) owns the scheduling; a combiner only has to make
//! `merge` associative and commutative for the result to be independent of tree shape.

/// A combiner over elements `V` with accumulator `A` and output `O`.
pub trait CombineFn<V, A, O>: Send + Sync {
    fn create(&self) -> A;

    fn add_input(&self, acc: &mut A, v: V);

    /// Called once after a partition's last `add_input`.
    fn compact(&self, _acc: &mut A) {}

    fn merge(&self, acc: &mut A, other: A);

    fn finish(&self, acc: A) -> O;
}
