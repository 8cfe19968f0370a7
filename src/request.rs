//! Selection requests.
//!
//! A request names a column by position, a percentage in `(0, 100]`, and a [`Direction`].
//! Requests also arrive in the numeric argument form of the `topn` primitive,
//! `(topn frame col nPercent getBottomN)`, where every argument is a number and
//! `getBottomN` is `0` for Top and `1` for Bottom; [`SelectRequest::from_numeric_args`]
//! converts that form.

use crate::error::{Result, SelectError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which end of the value range to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Largest values first.
    Top,
    /// Smallest values first.
    Bottom,
}

impl Direction {
    /// Decode the `getBottomN` flag: `0` is Top, `1` is Bottom.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Top),
            1 => Ok(Self::Bottom),
            other => Err(SelectError::InvalidDirection(other.to_string())),
        }
    }

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

impl FromStr for Direction {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "0" => Ok(Self::Top),
            "bottom" | "1" => Ok(Self::Bottom),
            _ => Err(SelectError::InvalidDirection(s.to_string())),
        }
    }
}

/// One extreme-row selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectRequest {
    /// Position of the target column.
    pub column: usize,
    /// Share of valid rows to return, in `(0, 100]`.
    pub percentage: f64,
    pub direction: Direction,
}

impl SelectRequest {
    #[must_use]
    pub const fn new(column: usize, percentage: f64, direction: Direction) -> Self {
        Self {
            column,
            percentage,
            direction,
        }
    }

    #[must_use]
    pub const fn top(column: usize, percentage: f64) -> Self {
        Self::new(column, percentage, Direction::Top)
    }

    #[must_use]
    pub const fn bottom(column: usize, percentage: f64) -> Self {
        Self::new(column, percentage, Direction::Bottom)
    }

    /// Build a request from the primitive's numeric arguments `(col, nPercent, getBottomN)`.
    ///
    /// Column index and flag must be integral.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    pub fn from_numeric_args(column: f64, percentage: f64, bottom_flag: f64) -> Result<Self> {
        if !column.is_finite() || column.fract() != 0.0 || column < 0.0 {
            return Err(SelectError::ColumnOutOfRange {
                index: if column.is_finite() { column as i64 } else { -1 },
                columns: 0,
            });
        }
        if !bottom_flag.is_finite() || bottom_flag.fract() != 0.0 {
            return Err(SelectError::InvalidDirection(bottom_flag.to_string()));
        }
        let direction = Direction::from_code(bottom_flag as i64)?;
        let request = Self::new(column as usize, percentage, direction);
        request.check_percentage()?;
        Ok(request)
    }

    /// Percentage must lie in `(0, 100]`; NaN is rejected.
    pub fn check_percentage(&self) -> Result<()> {
        if self.percentage > 0.0 && self.percentage <= 100.0 {
            Ok(())
        } else {
            Err(SelectError::InvalidPercentage(self.percentage))
        }
    }

    /// Check everything that does not need column metadata.
    pub fn validate(&self, num_columns: usize) -> Result<()> {
        self.check_percentage()?;
        if self.column >= num_columns {
            return Err(SelectError::ColumnOutOfRange {
                index: i64::try_from(self.column).unwrap_or(i64::MAX),
                columns: num_columns,
            });
        }
        Ok(())
    }

    /// `round(percentage * 0.01 * valid_rows)`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn row_budget(&self, valid_rows: u64) -> u64 {
        (self.percentage * 0.01 * valid_rows as f64).round() as u64
    }
}
