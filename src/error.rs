//! Error type for extreme-row selection.
//!
//! Failures fall into three groups:
//!
//! - **Request validation** -- percentage outside `(0, 100]`, a column index that does not
//!   exist, or an unrecognized direction. Always reported before any partition is read.
//! - **Type** -- the target column is not numeric.
//! - **Execution** -- anything raised by the column store or the execution substrate. These
//!   arrive as [`anyhow::Error`] and are propagated unchanged; nothing here retries them.
//!
//! Missing values are never an error: they are skipped during collection.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = SelectError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SelectError {
    /// Percentage must lie in `(0, 100]`.
    #[error("percentage must be in (0, 100], got {0}")]
    InvalidPercentage(f64),

    #[error("column index {index} out of range for a table with {columns} column(s)")]
    ColumnOutOfRange { index: i64, columns: usize },

    /// Direction was neither Top nor Bottom.
    #[error("invalid direction `{0}`: expected top (0) or bottom (1)")]
    InvalidDirection(String),

    #[error("column `{column}` is not numeric (found {found})")]
    NotNumeric { column: String, found: String },

    /// Failure surfaced by the column store or the execution substrate.
    #[error("execution failed: {0:#}")]
    Execution(#[from] anyhow::Error),
}

impl SelectError {
    /// True for errors detected while checking the request itself.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPercentage(_) | Self::ColumnOutOfRange { .. } | Self::InvalidDirection(_)
        )
    }
}
