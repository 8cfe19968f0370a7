//! In-memory column store.
//!
//! Columns hold plain vectors and are split into contiguous chunks of at most
//! `chunk_rows` rows, the same way a source vector is split into partitions for
//! parallel execution. Missing values are `None` for integer and text columns and
//! `NaN` for float columns.

use super::{Column, ColumnChunk, ColumnType, Table};
use anyhow::bail;

/// Default number of rows per chunk.
pub const DEFAULT_CHUNK_ROWS: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
enum ColumnData {
    Int64(Vec<Option<i64>>),
    Float64(Vec<f64>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }
}

/// A column held entirely in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct MemColumn {
    name: String,
    data: ColumnData,
    chunk_rows: usize,
}

impl MemColumn {
    pub fn int64<S: Into<String>>(name: S, values: Vec<Option<i64>>) -> Self {
        Self::with_data(name, ColumnData::Int64(values))
    }

    /// Float column; `NaN` marks a missing value.
    pub fn float64<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self::with_data(name, ColumnData::Float64(values))
    }

    pub fn text<S: Into<String>>(name: S, values: Vec<Option<String>>) -> Self {
        Self::with_data(name, ColumnData::Text(values))
    }

    fn with_data<S: Into<String>>(name: S, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
            chunk_rows: DEFAULT_CHUNK_ROWS,
        }
    }

    /// Set the maximum chunk length. Zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, rows: usize) -> Self {
        self.chunk_rows = rows.max(1);
        self
    }

    /// Half-open `(start, end)` row ranges of this column's chunks.
    #[must_use]
    pub fn chunk_bounds(&self) -> Vec<(usize, usize)> {
        let len = self.data.len();
        (0..len)
            .step_by(self.chunk_rows)
            .map(|start| (start, (start + self.chunk_rows).min(len)))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }
}

impl Column for MemColumn {
    type Chunk<'a> = MemChunk<'a>;

    fn name(&self) -> &str {
        &self.name
    }

    fn column_type(&self) -> ColumnType {
        match self.data {
            ColumnData::Int64(_) => ColumnType::Int64,
            ColumnData::Float64(_) => ColumnType::Float64,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    fn valid_count(&self) -> anyhow::Result<u64> {
        let n = match &self.data {
            ColumnData::Int64(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Float64(v) => v.iter().filter(|x| !x.is_nan()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_some()).count(),
        };
        Ok(n as u64)
    }

    fn chunks(&self) -> anyhow::Result<Vec<MemChunk<'_>>> {
        let chunks = self
            .chunk_bounds()
            .into_iter()
            .map(|(lo, hi)| {
                let rows = match &self.data {
                    ColumnData::Int64(v) => ChunkRows::Int64(&v[lo..hi]),
                    ColumnData::Float64(v) => ChunkRows::Float64(&v[lo..hi]),
                    ColumnData::Text(v) => ChunkRows::Text(&v[lo..hi]),
                };
                MemChunk {
                    start: lo as u64,
                    rows,
                }
            })
            .collect();
        Ok(chunks)
    }
}

#[derive(Clone, Copy, Debug)]
enum ChunkRows<'a> {
    Int64(&'a [Option<i64>]),
    Float64(&'a [f64]),
    Text(&'a [Option<String>]),
}

/// A borrowed contiguous slice of a [`MemColumn`].
#[derive(Clone, Copy, Debug)]
pub struct MemChunk<'a> {
    start: u64,
    rows: ChunkRows<'a>,
}

impl ColumnChunk for MemChunk<'_> {
    fn start(&self) -> u64 {
        self.start
    }

    fn len(&self) -> usize {
        match self.rows {
            ChunkRows::Int64(v) => v.len(),
            ChunkRows::Float64(v) => v.len(),
            ChunkRows::Text(v) => v.len(),
        }
    }

    fn is_missing(&self, offset: usize) -> bool {
        match self.rows {
            ChunkRows::Int64(v) => v[offset].is_none(),
            ChunkRows::Float64(v) => v[offset].is_nan(),
            ChunkRows::Text(v) => v[offset].is_none(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn at_i64(&self, offset: usize) -> i64 {
        match self.rows {
            ChunkRows::Int64(v) => v[offset].unwrap_or_default(),
            ChunkRows::Float64(v) => v[offset] as i64,
            ChunkRows::Text(_) => 0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn at_f64(&self, offset: usize) -> f64 {
        match self.rows {
            ChunkRows::Int64(v) => v[offset].map_or(f64::NAN, |x| x as f64),
            ChunkRows::Float64(v) => v[offset],
            ChunkRows::Text(_) => f64::NAN,
        }
    }
}

/// A table of in-memory columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemTable {
    columns: Vec<MemColumn>,
}

impl MemTable {
    /// Build a table; every column must have the same length.
    pub fn new(columns: Vec<MemColumn>) -> anyhow::Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
                bail!(
                    "column `{}` has {} rows, expected {rows}",
                    bad.name,
                    bad.len()
                );
            }
        }
        Ok(Self { columns })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, MemColumn::len)
    }

    /// Position of the column called `name`, if any.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl Table for MemTable {
    type Column = MemColumn;

    fn num_columns(&self) -> usize {
        self.columns.len()
    }

    fn column(&self, index: usize) -> Option<&MemColumn> {
        self.columns.get(index)
    }
}
