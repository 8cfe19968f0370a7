use anyhow::{Result, anyhow};
use ironrank::store::MemChunk;
use ironrank::*;

/// A store that answers metadata but fails when partitions are requested.
struct FailingColumn {
    reads: std::sync::atomic::AtomicUsize,
}

impl Column for FailingColumn {
    type Chunk<'a> = MemChunk<'a>;

    fn name(&self) -> &str {
        "flaky"
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Float64
    }

    fn valid_count(&self) -> Result<u64> {
        Ok(100)
    }

    fn chunks(&self) -> Result<Vec<MemChunk<'_>>> {
        self.reads
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(anyhow!("node 3 lost while reading partition 12"))
    }
}

struct FailingTable(FailingColumn);

impl Table for FailingTable {
    type Column = FailingColumn;

    fn num_columns(&self) -> usize {
        1
    }

    fn column(&self, index: usize) -> Option<&FailingColumn> {
        (index == 0).then_some(&self.0)
    }
}

/// Wraps a column and hands its partitions out last-first.
struct ReversedChunks(MemColumn);

impl Column for ReversedChunks {
    type Chunk<'a> = MemChunk<'a>;

    fn name(&self) -> &str {
        self.0.name()
    }

    fn column_type(&self) -> ColumnType {
        self.0.column_type()
    }

    fn valid_count(&self) -> Result<u64> {
        self.0.valid_count()
    }

    fn chunks(&self) -> Result<Vec<MemChunk<'_>>> {
        let mut chunks = self.0.chunks()?;
        chunks.reverse();
        Ok(chunks)
    }
}

struct OneColumn(ReversedChunks);

impl Table for OneColumn {
    type Column = ReversedChunks;

    fn num_columns(&self) -> usize {
        1
    }

    fn column(&self, index: usize) -> Option<&ReversedChunks> {
        (index == 0).then_some(&self.0)
    }
}

fn failing() -> FailingTable {
    FailingTable(FailingColumn {
        reads: std::sync::atomic::AtomicUsize::new(0),
    })
}

#[test]
fn store_failure_propagates_as_execution_error() {
    let table = failing();
    let err = select_extreme_rows(&table, 0, 10.0, Direction::Top).unwrap_err();
    assert!(matches!(err, SelectError::Execution(_)));
    assert!(err.to_string().contains("node 3 lost"), "{err}");
}

#[test]
fn validation_runs_before_any_partition_is_read() {
    let table = failing();
    let err = select_extreme_rows(&table, 0, 0.0, Direction::Top).unwrap_err();
    assert!(matches!(err, SelectError::InvalidPercentage(_)));
    let err = select_extreme_rows(&table, 4, 10.0, Direction::Top).unwrap_err();
    assert!(matches!(err, SelectError::ColumnOutOfRange { .. }));
    assert_eq!(
        table.0.reads.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[test]
fn tie_order_controls_partial_bucket() -> Result<()> {
    let column = MemColumn::int64("x", vec![Some(5); 4]).with_chunk_size(1);
    let table = OneColumn(ReversedChunks(column));
    let request = SelectRequest::top(0, 100.0);

    // one bucket, so one output row; discovery order starts at the last partition
    let stored = Selector::new(SelectOptions::sequential()).select(&table, &request)?;
    assert_eq!(stored.row_indices(), &[3]);

    let sorted = Selector::new(SelectOptions::sequential().with_tie_order(TieOrder::RowIndex))
        .select(&table, &request)?;
    assert_eq!(sorted.row_indices(), &[0]);
    Ok(())
}

#[test]
fn mem_column_chunks_cover_rows_in_order() -> Result<()> {
    let column = MemColumn::float64("f", vec![1.0, f64::NAN, 3.0, 4.0, 5.0]).with_chunk_size(2);
    assert_eq!(column.chunk_bounds(), vec![(0, 2), (2, 4), (4, 5)]);
    assert_eq!(column.valid_count()?, 4);

    let chunks = column.chunks()?;
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[1].start(), 2);
    assert_eq!(chunks[1].row_index(1), 3);
    assert!(chunks[0].is_missing(1));
    assert_eq!(chunks[2].len(), 1);
    assert_eq!(chunks[2].at_f64(0), 5.0);
    Ok(())
}

#[test]
fn mem_table_rejects_ragged_columns() {
    let err = MemTable::new(vec![
        MemColumn::int64("a", vec![Some(1), Some(2)]),
        MemColumn::int64("b", vec![Some(1)]),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("`b`"), "{err}");
}

#[test]
fn mem_table_lookup() -> Result<()> {
    let table = MemTable::new(vec![
        MemColumn::int64("a", vec![Some(1), None]),
        MemColumn::text("b", vec![None, Some("z".into())]),
    ])?;
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.num_columns(), 2);
    assert_eq!(table.column_index("b"), Some(1));
    assert_eq!(table.column(1).map(Column::column_type), Some(ColumnType::Text));
    assert!(!ColumnType::Text.is_numeric());
    assert_eq!(ColumnType::Int64.numeric_repr(), Some(NumericRepr::Int64));
    Ok(())
}
