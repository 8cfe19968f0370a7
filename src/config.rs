//! Selection options.
//!
//! [`SelectOptions`] carries everything about *how* a selection runs, as opposed to
//! *what* it selects (see [`SelectRequest`](crate::request::SelectRequest)). Options are
//! plain serde data, so callers can keep them in JSON next to the rest of their settings:
//!
//! ```
//! use ironrank::config::{SelectOptions, TieOrder};
//! use ironrank::runner::ExecMode;
//!
//! let opts = SelectOptions::from_json(
//!     r#"{ "exec": "sequential", "fanout": 4, "tie_order": "row_index" }"#,
//! )?;
//! assert_eq!(opts.exec, ExecMode::Sequential);
//! assert_eq!(opts.tie_order, TieOrder::RowIndex);
//! assert_eq!(opts.row_index_label, "Original_Row_Indices");
//! # Ok::<_, anyhow::Error>(())
//! ```

use crate::runner::{ExecMode, Runner};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default name of the output row-index column.
pub const ROW_INDEX_LABEL: &str = "Original_Row_Indices";

/// Order of rows that share one value when a bucket is only partly emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieOrder {
    /// Discovery order: partition order, then merge order.
    #[default]
    Stored,
    /// Ascending row index; identical across partitionings.
    RowIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectOptions {
    pub exec: ExecMode,
    /// Maximum partial results merged per reduction round; `None` for a binary tree.
    pub fanout: Option<usize>,
    pub tie_order: TieOrder,
    pub row_index_label: String,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            exec: ExecMode::default(),
            fanout: None,
            tie_order: TieOrder::Stored,
            row_index_label: ROW_INDEX_LABEL.to_string(),
        }
    }
}

impl SelectOptions {
    /// Single-threaded execution with otherwise default options.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            exec: ExecMode::Sequential,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid selection options")
    }

    #[must_use]
    pub fn with_exec(mut self, exec: ExecMode) -> Self {
        self.exec = exec;
        self
    }

    #[must_use]
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = Some(fanout);
        self
    }

    #[must_use]
    pub fn with_tie_order(mut self, tie_order: TieOrder) -> Self {
        self.tie_order = tie_order;
        self
    }

    #[must_use]
    pub fn with_row_index_label<S: Into<String>>(mut self, label: S) -> Self {
        self.row_index_label = label.into();
        self
    }

    #[must_use]
    pub fn runner(&self) -> Runner {
        Runner::new(self.exec, self.fanout)
    }
}
