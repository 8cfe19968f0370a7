//! Scalar keys and values.
//!
//! A column is read either as 64-bit integers or as 64-bit floats, decided once from its
//! storage type ([`NumericRepr`]). The selection machinery is generic over [`ScalarKey`] and
//! the driver picks the concrete key type up front, so no per-value type inspection happens
//! while scanning.
//!
//! Floating keys are [`NotNan<f64>`]: grouping uses exact IEEE equality and the ordering is
//! total, which is what an ordered map needs. A NaN can never become a key.

use crate::store::ColumnChunk;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Numeric storage representation of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericRepr {
    Int64,
    Float64,
}

/// A single output value, tagged with its representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Int64(i64),
    Float64(f64),
}

impl Scalar {
    /// Value widened to `f64` (lossy for very large integers).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int64(v) => v as f64,
            Self::Float64(v) => v,
        }
    }

    #[must_use]
    pub const fn repr(self) -> NumericRepr {
        match self {
            Self::Int64(_) => NumericRepr::Int64,
            Self::Float64(_) => NumericRepr::Float64,
        }
    }
}

/// A totally ordered key read from a numeric column.
///
/// Implemented for `i64` (integral columns) and `NotNan<f64>` (floating columns).
pub trait ScalarKey: Ord + Copy + Debug + Send + Sync + 'static {
    /// Representation this key type reads and writes.
    const REPR: NumericRepr;

    /// Read the value at `offset`, or `None` if it cannot be used as a key.
    ///
    /// Callers check [`ColumnChunk::is_missing`] first; this only filters values
    /// the store failed to flag (a NaN in a float column).
    fn read<C: ColumnChunk + ?Sized>(chunk: &C, offset: usize) -> Option<Self>;

    fn to_scalar(self) -> Scalar;
}

impl ScalarKey for i64 {
    const REPR: NumericRepr = NumericRepr::Int64;

    #[inline]
    fn read<C: ColumnChunk + ?Sized>(chunk: &C, offset: usize) -> Option<Self> {
        Some(chunk.at_i64(offset))
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Int64(self)
    }
}

impl ScalarKey for NotNan<f64> {
    const REPR: NumericRepr = NumericRepr::Float64;

    #[inline]
    fn read<C: ColumnChunk + ?Sized>(chunk: &C, offset: usize) -> Option<Self> {
        Self::new(chunk.at_f64(offset)).ok()
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Float64(self.into_inner())
    }
}
