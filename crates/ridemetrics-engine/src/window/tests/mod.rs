use ridemetrics_types::{Record, Value};

use super::*;
use crate::definition::OrderByItem;

mod aggregates;
mod partitions;
mod ranking;

fn make_test_records(values: Vec<i64>) -> Vec<Record> {
    values.into_iter().map(|v| Record::new().with("score", v)).collect()
}

fn make_nullable_records(values: Vec<Option<i64>>) -> Vec<Record> {
    values.into_iter().map(|v| Record::new().with("score", v)).collect()
}

/// Single partition sorted by `order_by`
fn sorted_partition<'a>(records: &'a [Record], order_by: &[OrderByItem]) -> Partition<'a> {
    let mut partition = Partition::new(records.iter().collect());
    sort_partition(&mut partition, order_by).unwrap();
    partition
}

fn score_desc() -> Vec<OrderByItem> {
    vec![OrderByItem::desc("score")]
}

fn ints(values: &[Value]) -> Vec<i64> {
    values.iter().map(|v| v.as_i64().unwrap()).collect()
}

fn floats(values: &[Value]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64().unwrap()).collect()
}
