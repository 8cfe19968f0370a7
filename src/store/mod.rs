//! Partitioned columnar store interface.
//!
//! The selection core never owns table storage. It reads columns through these traits:
//!
//! - [`Table`] -- a set of named columns addressed by position.
//! - [`Column`] -- typed metadata, the non-missing row count, and the column's partitions.
//! - [`ColumnChunk`] -- one contiguous partition: missing-value test, typed access, and the
//!   absolute row index of an in-partition offset.
//!
//! Enumerating partitions and counting valid rows are fallible (`anyhow::Result`) because a
//! real store may need I/O for them; the failure is propagated as an execution error.
//! Per-row access is infallible.
//!
//! [`MemTable`] is an in-memory implementation, used by tests and by callers that already
//! hold their data in vectors.

mod memory;

pub use memory::{DEFAULT_CHUNK_ROWS, MemChunk, MemColumn, MemTable};

use crate::scalar::NumericRepr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Text,
}

impl ColumnType {
    /// Numeric representation, or `None` for non-numeric columns.
    #[must_use]
    pub const fn numeric_repr(self) -> Option<NumericRepr> {
        match self {
            Self::Int64 => Some(NumericRepr::Int64),
            Self::Float64 => Some(NumericRepr::Float64),
            Self::Text => None,
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.numeric_repr().is_some()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Text => "text",
        };
        f.write_str(s)
    }
}

/// One contiguous partition of a column.
pub trait ColumnChunk {
    /// Absolute row index of this chunk's first row.
    fn start(&self) -> u64;

    /// Number of rows in this chunk.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_missing(&self, offset: usize) -> bool;

    /// Value at `offset` read as a 64-bit integer.
    fn at_i64(&self, offset: usize) -> i64;

    /// Value at `offset` read as a 64-bit float.
    fn at_f64(&self, offset: usize) -> f64;

    /// Absolute row index of an in-chunk offset.
    #[allow(clippy::cast_possible_truncation)]
    fn row_index(&self, offset: usize) -> u64 {
        self.start() + offset as u64
    }
}

/// A named, typed, partitioned column.
pub trait Column: Send + Sync {
    type Chunk<'a>: ColumnChunk + Send + 'a
    where
        Self: 'a;

    fn name(&self) -> &str;

    fn column_type(&self) -> ColumnType;

    /// Number of rows whose value is present.
    fn valid_count(&self) -> anyhow::Result<u64>;

    /// The column's partitions, in row order.
    fn chunks(&self) -> anyhow::Result<Vec<Self::Chunk<'_>>>;
}

/// A table of columns addressed by position.
pub trait Table: Sync {
    type Column: Column;

    fn num_columns(&self) -> usize;

    fn column(&self, index: usize) -> Option<&Self::Column>;
}
