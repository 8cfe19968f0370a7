//! Extreme-row selection driver.
//!
//! [`Selector::select`] checks the request, computes the row budget from the column's
//! valid-row count, runs [`ExtremeRows`] over the column's partitions, and returns the
//! ranked frame. Every validation failure is reported before any partition is read, and
//! a failure from the store or the runner is returned instead of a partial result.

use crate::combiners::{ExtremeRows, PresentRows};
use crate::config::SelectOptions;
use crate::error::{Result, SelectError};
use crate::frame::TopNFrame;
use crate::request::{Direction, SelectRequest};
use crate::runner::Runner;
use crate::scalar::{NumericRepr, ScalarKey};
use crate::store::{Column, Table};
use log::{debug, info};
use ordered_float::NotNan;

/// Select the `percentage` most extreme rows of column `column` with default options.
///
/// ```
/// use ironrank::{Direction, MemColumn, MemTable, select_extreme_rows};
///
/// let table = MemTable::new(vec![MemColumn::int64(
///     "score",
///     vec![Some(10), Some(10), Some(5), Some(5), Some(5), Some(1)],
/// )])?;
/// let top = select_extreme_rows(&table, 0, 50.0, Direction::Top)?;
/// assert_eq!(top.row_indices(), &[0, 1, 2]);
/// assert_eq!(top.names()[1], "score");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn select_extreme_rows<T: Table>(
    table: &T,
    column: usize,
    percentage: f64,
    direction: Direction,
) -> Result<TopNFrame> {
    Selector::default().select(table, &SelectRequest::new(column, percentage, direction))
}

/// Runs selections with a fixed set of [`SelectOptions`].
#[derive(Clone, Debug, Default)]
pub struct Selector {
    options: SelectOptions,
}

impl Selector {
    #[must_use]
    pub const fn new(options: SelectOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn select<T: Table>(&self, table: &T, request: &SelectRequest) -> Result<TopNFrame> {
        request.validate(table.num_columns())?;
        let column = table
            .column(request.column)
            .ok_or_else(|| SelectError::ColumnOutOfRange {
                index: i64::try_from(request.column).unwrap_or(i64::MAX),
                columns: table.num_columns(),
            })?;
        let column_type = column.column_type();
        let repr = column_type
            .numeric_repr()
            .ok_or_else(|| SelectError::NotNumeric {
                column: column.name().to_string(),
                found: column_type.to_string(),
            })?;

        let valid_rows = column.valid_count()?;
        let budget = request.row_budget(valid_rows);
        let names = [
            self.options.row_index_label.clone(),
            column.name().to_string(),
        ];
        debug!(
            "select {} {}% of `{}`: {valid_rows} valid row(s), budget {budget}",
            request.direction,
            request.percentage,
            column.name()
        );

        let frame = if budget == 0 {
            TopNFrame::empty(names, repr)
        } else {
            let runner = self.options.runner();
            let direction = request.direction;
            match repr {
                NumericRepr::Int64 => {
                    self.run::<i64, _>(&runner, column, budget, direction, names)?
                }
                NumericRepr::Float64 => {
                    self.run::<NotNan<f64>, _>(&runner, column, budget, direction, names)?
                }
            }
        };

        info!(
            "{} of `{}`: {} row(s) selected (budget {budget})",
            request.direction,
            column.name(),
            frame.num_rows()
        );
        Ok(frame)
    }

    fn run<K: ScalarKey, C: Column>(
        &self,
        runner: &Runner,
        column: &C,
        budget: u64,
        direction: Direction,
        names: [String; 2],
    ) -> Result<TopNFrame> {
        let parts: Vec<PresentRows<K, C::Chunk<'_>>> = column
            .chunks()?
            .into_iter()
            .map(PresentRows::new)
            .collect();
        let comb = ExtremeRows::<K>::new(budget, direction, self.options.tie_order, names);
        runner.combine(parts, &comb).map_err(SelectError::from)
    }
}
