//! Row-index bucket for one exact key value.

/// All absolute row indices that share one key, in discovery order.
///
/// The sequence is append-only; merging two buckets concatenates them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueBucket {
    rows: Vec<u64>,
}

impl ValueBucket {
    #[must_use]
    pub fn new(row: u64) -> Self {
        Self { rows: vec![row] }
    }

    #[inline]
    pub fn push(&mut self, row: u64) {
        self.rows.push(row);
    }

    /// Append `other`'s rows after this bucket's rows.
    pub fn append(&mut self, mut other: Self) {
        if self.rows.is_empty() {
            self.rows = other.rows;
        } else {
            self.rows.append(&mut other.rows);
        }
    }

    /// Sort row indices ascending.
    pub fn sort_rows(&mut self) {
        self.rows.sort_unstable();
    }

    #[must_use]
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<u64> {
        self.rows
    }
}
