//! Execution of a [`CombineFn`] over partitions.
//!
//! The runner is the data-parallel substrate: each partition (or a group of adjacent
//! partitions) is folded into its own accumulator with no shared state, accumulators are
//! merged through a reduction tree, and the single survivor is finished.
//!
//! - **Sequential** -- partitions folded one after another, merges applied left to right
//!   (or in fanout rounds when a fanout is set).
//! - **Parallel** -- partition folds run on Rayon workers. Without a fanout the reduction
//!   is Rayon's binary `reduce_with` tree; with a fanout, merges happen in rounds where each
//!   round merges groups of at most `fanout` adjacent accumulators.
//!
//! A merge only waits for its own inputs. Nothing is cancelled or retried here.

use crate::combine::CombineFn;
use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How partitions are executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    Sequential,
    /// `threads`: dedicated pool size (`None` uses the global Rayon pool).
    /// `partitions`: maximum number of map tasks; adjacent partitions are coalesced.
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

impl Default for ExecMode {
    fn default() -> Self {
        Self::Parallel {
            threads: None,
            partitions: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    /// Maximum accumulators merged per reduction round; `None` for a binary tree.
    pub fanout: Option<usize>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::default(),
            default_partitions: 2 * num_cpus::get().max(2),
            fanout: None,
        }
    }
}

impl Runner {
    #[must_use]
    pub fn new(mode: ExecMode, fanout: Option<usize>) -> Self {
        Self {
            mode,
            fanout,
            ..Default::default()
        }
    }

    /// Fold every partition with `comb`, merge the partial results, and finish.
    ///
    /// An empty partition list finishes a freshly created accumulator.
    pub fn combine<P, V, A, O, C>(&self, parts: Vec<P>, comb: &C) -> Result<O>
    where
        P: IntoIterator<Item = V> + Send,
        A: Send,
        O: Send,
        C: CombineFn<V, A, O>,
    {
        let acc = match self.mode {
            ExecMode::Sequential => exec_seq::<P, V, A, O, C>(parts, comb, self.fanout),
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let tasks = partitions.unwrap_or(self.default_partitions).max(1);
                let fanout = self.fanout;
                match threads {
                    Some(t) => {
                        let pool = rayon::ThreadPoolBuilder::new()
                            .num_threads(t)
                            .build()
                            .context("failed to build worker pool")?;
                        pool.install(|| exec_parallel::<P, V, A, O, C>(parts, comb, tasks, fanout))
                    }
                    None => exec_parallel::<P, V, A, O, C>(parts, comb, tasks, fanout),
                }
            }
        };
        Ok(comb.finish(acc))
    }
}

/// Fold one map task (one or more adjacent partitions) into a compacted accumulator.
fn fold_task<P, V, A, O, C>(comb: &C, task: Vec<P>) -> A
where
    P: IntoIterator<Item = V>,
    C: CombineFn<V, A, O>,
{
    let mut acc = comb.create();
    for part in task {
        for v in part {
            comb.add_input(&mut acc, v);
        }
    }
    comb.compact(&mut acc);
    acc
}

/// Merge a non-empty group left to right.
fn merge_group<V, A, O, C>(comb: &C, group: Vec<A>) -> A
where
    C: CombineFn<V, A, O>,
{
    let mut it = group.into_iter();
    let mut acc = it.next().unwrap_or_else(|| comb.create());
    for other in it {
        comb.merge(&mut acc, other);
    }
    acc
}

fn exec_seq<P, V, A, O, C>(parts: Vec<P>, comb: &C, fanout: Option<usize>) -> A
where
    P: IntoIterator<Item = V>,
    C: CombineFn<V, A, O>,
{
    debug!("sequential combine over {} partition(s)", parts.len());
    let mut accs: Vec<A> = parts
        .into_iter()
        .map(|p| fold_task::<P, V, A, O, C>(comb, vec![p]))
        .collect();

    let Some(fanout) = fanout else {
        return merge_group::<V, A, O, C>(comb, accs);
    };
    let fanout = fanout.max(2);
    let mut round = 0usize;
    while accs.len() > 1 {
        accs = group_adjacent(accs, fanout)
            .into_iter()
            .map(|g| merge_group::<V, A, O, C>(comb, g))
            .collect();
        round += 1;
        debug!("merge round {round}: {} accumulator(s) left", accs.len());
    }
    accs.pop().unwrap_or_else(|| comb.create())
}

fn exec_parallel<P, V, A, O, C>(parts: Vec<P>, comb: &C, tasks: usize, fanout: Option<usize>) -> A
where
    P: IntoIterator<Item = V> + Send,
    A: Send,
    C: CombineFn<V, A, O>,
{
    let n_parts = parts.len();
    let chunk = n_parts.div_ceil(tasks).max(1);
    let grouped = group_adjacent(parts, chunk);
    debug!(
        "parallel combine: {n_parts} partition(s) in {} map task(s)",
        grouped.len()
    );

    let mut accs: Vec<A> = grouped
        .into_par_iter()
        .map(|task| fold_task::<P, V, A, O, C>(comb, task))
        .collect();

    let Some(fanout) = fanout else {
        return accs
            .into_par_iter()
            .reduce_with(|mut a, b| {
                comb.merge(&mut a, b);
                a
            })
            .unwrap_or_else(|| comb.create());
    };
    let fanout = fanout.max(2);
    let mut round = 0usize;
    while accs.len() > 1 {
        accs = accs
            .into_par_iter()
            .chunks(fanout)
            .map(|g| merge_group::<V, A, O, C>(comb, g))
            .collect();
        round += 1;
        debug!(
            "merge round {round} (fanout {fanout}): {} accumulator(s) left",
            accs.len()
        );
    }
    accs.pop().unwrap_or_else(|| comb.create())
}

/// Split `items` into consecutive groups of at most `size`, preserving order.
fn group_adjacent<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut out = Vec::with_capacity(items.len().div_ceil(size));
    let mut cur = Vec::new();
    for item in items {
        cur.push(item);
        if cur.len() == size {
            out.push(std::mem::take(&mut cur));
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}
