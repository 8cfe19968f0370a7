use anyhow::Result;
use ironrank::*;

#[test]
fn defaults() {
    let opts = SelectOptions::default();
    assert_eq!(
        opts.exec,
        ExecMode::Parallel {
            threads: None,
            partitions: None
        }
    );
    assert_eq!(opts.fanout, None);
    assert_eq!(opts.tie_order, TieOrder::Stored);
    assert_eq!(opts.row_index_label, "Original_Row_Indices");
    assert!(Runner::default().default_partitions >= 4);
}

#[test]
fn from_json_partial() -> Result<()> {
    let opts = SelectOptions::from_json(r#"{ "exec": { "parallel": { "threads": 4 } } }"#)?;
    assert_eq!(
        opts.exec,
        ExecMode::Parallel {
            threads: Some(4),
            partitions: None
        }
    );
    assert_eq!(opts.tie_order, TieOrder::Stored);

    let opts = SelectOptions::from_json(r#"{ "exec": "sequential", "row_index_label": "idx" }"#)?;
    assert_eq!(opts.exec, ExecMode::Sequential);
    assert_eq!(opts.row_index_label, "idx");

    assert_eq!(SelectOptions::from_json("{}")?, SelectOptions::default());
    Ok(())
}

#[test]
fn from_json_rejects_unknown_fields() {
    let err = SelectOptions::from_json(r#"{ "fan_out": 3 }"#).unwrap_err();
    assert!(format!("{err:#}").contains("fan_out"), "{err:#}");
}

#[test]
fn json_round_trip_of_options() -> Result<()> {
    let opts = SelectOptions::sequential()
        .with_fanout(8)
        .with_tie_order(TieOrder::RowIndex);
    let text = serde_json::to_string(&opts)?;
    assert_eq!(SelectOptions::from_json(&text)?, opts);

    let runner = opts.runner();
    assert_eq!(runner.mode, ExecMode::Sequential);
    assert_eq!(runner.fanout, Some(8));
    Ok(())
}

#[test]
fn selector_uses_its_options() -> Result<()> {
    let table = MemTable::new(vec![MemColumn::int64("x", vec![Some(3), Some(1), Some(2)])])?;
    let selector = Selector::new(SelectOptions::sequential().with_row_index_label("i"));
    assert_eq!(selector.options().exec, ExecMode::Sequential);
    let out = selector.select(&table, &SelectRequest::bottom(0, 100.0))?;
    assert_eq!(out.names()[0], "i");
    assert_eq!(out.row_indices(), &[1, 2, 0]);
    Ok(())
}
