//! Result table: original row index plus selected value.

use crate::scalar::{NumericRepr, Scalar};

/// Output value column, in the source column's representation.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueColumn {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ValueColumn {
    /// Allocate a zero-filled column of `len` values.
    #[must_use]
    pub fn zeroed(repr: NumericRepr, len: usize) -> Self {
        match repr {
            NumericRepr::Int64 => Self::Int64(vec![0; len]),
            NumericRepr::Float64 => Self::Float64(vec![0.0; len]),
        }
    }

    #[must_use]
    pub const fn repr(&self) -> NumericRepr {
        match self {
            Self::Int64(_) => NumericRepr::Int64,
            Self::Float64(_) => NumericRepr::Float64,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Scalar> {
        match self {
            Self::Int64(v) => v.get(idx).copied().map(Scalar::Int64),
            Self::Float64(v) => v.get(idx).copied().map(Scalar::Float64),
        }
    }

    /// Store `value` at `idx`, converting if the representations differ.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set(&mut self, idx: usize, value: Scalar) {
        match (self, value) {
            (Self::Int64(v), Scalar::Int64(x)) => v[idx] = x,
            (Self::Int64(v), Scalar::Float64(x)) => v[idx] = x as i64,
            (Self::Float64(v), Scalar::Float64(x)) => v[idx] = x,
            (Self::Float64(v), s @ Scalar::Int64(_)) => v[idx] = s.as_f64(),
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            Self::Int64(v) => Some(v),
            Self::Float64(_) => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            Self::Float64(v) => Some(v),
            Self::Int64(_) => None,
        }
    }
}

/// The two-column selection result, in rank order.
#[derive(Clone, Debug, PartialEq)]
pub struct TopNFrame {
    names: [String; 2],
    row_indices: Vec<u64>,
    values: ValueColumn,
}

impl TopNFrame {
    /// # Panics
    /// Panics if the two columns differ in length.
    #[must_use]
    pub fn new(names: [String; 2], row_indices: Vec<u64>, values: ValueColumn) -> Self {
        assert_eq!(
            row_indices.len(),
            values.len(),
            "row-index and value columns must have equal length"
        );
        Self {
            names,
            row_indices,
            values,
        }
    }

    /// A zero-row frame with the given names and value representation.
    #[must_use]
    pub fn empty(names: [String; 2], repr: NumericRepr) -> Self {
        Self::new(names, Vec::new(), ValueColumn::zeroed(repr, 0))
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_indices.len()
    }

    #[must_use]
    pub const fn num_columns(&self) -> usize {
        2
    }

    /// `[row-index label, source column name]`.
    #[must_use]
    pub fn names(&self) -> &[String; 2] {
        &self.names
    }

    #[must_use]
    pub fn row_indices(&self) -> &[u64] {
        &self.row_indices
    }

    #[must_use]
    pub fn values(&self) -> &ValueColumn {
        &self.values
    }

    /// `(row index, value)` pairs in rank order.
    pub fn rows(&self) -> impl Iterator<Item = (u64, Scalar)> + '_ {
        self.row_indices
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| self.values.get(i).map(|v| (r, v)))
    }

    #[must_use]
    pub fn into_parts(self) -> ([String; 2], Vec<u64>, ValueColumn) {
        (self.names, self.row_indices, self.values)
    }
}
