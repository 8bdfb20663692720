use ridemetrics_types::SchemaError;

use super::*;
use crate::definition::{AggregateKind, WindowFunction, WindowFunctionSpec};

#[test]
fn test_count_star_and_count_field() {
    let records = make_nullable_records(vec![Some(1), None, Some(3)]);
    let partition = sorted_partition(&records, &[]);

    let star = evaluate_partition_aggregate(&partition, AggregateKind::Count, None).unwrap();
    let field = evaluate_partition_aggregate(&partition, AggregateKind::Count, Some("score")).unwrap();

    assert_eq!(star, vec![Value::Integer(3); 3]);
    assert_eq!(field, vec![Value::Integer(2); 3]);
}

#[test]
fn test_sum_stays_integer() {
    let records = make_nullable_records(vec![Some(1), None, Some(3)]);
    let partition = sorted_partition(&records, &[]);

    let result = evaluate_partition_aggregate(&partition, AggregateKind::Sum, Some("score")).unwrap();

    assert_eq!(result, vec![Value::Integer(4); 3]);
}

#[test]
fn test_sum_mixed_numbers_is_numeric() {
    let records = vec![Record::new().with("fare", 1), Record::new().with("fare", 2.5)];
    let partition = sorted_partition(&records, &[]);

    let result = evaluate_partition_aggregate(&partition, AggregateKind::Sum, Some("fare")).unwrap();

    assert_eq!(result[0], Value::Numeric(3.5));
}

#[test]
fn test_avg_min_max() {
    let records = make_test_records(vec![4, 1, 7]);
    let partition = sorted_partition(&records, &[]);

    let avg = evaluate_partition_aggregate(&partition, AggregateKind::Avg, Some("score")).unwrap();
    let min = evaluate_partition_aggregate(&partition, AggregateKind::Min, Some("score")).unwrap();
    let max = evaluate_partition_aggregate(&partition, AggregateKind::Max, Some("score")).unwrap();

    assert_eq!(avg[2], Value::Numeric(4.0));
    assert_eq!(min, vec![Value::Integer(1); 3]);
    assert_eq!(max, vec![Value::Integer(7); 3]);
}

#[test]
fn test_all_null_partition_aggregates_are_null() {
    let records = make_nullable_records(vec![None, None]);
    let partition = sorted_partition(&records, &[]);

    for kind in [AggregateKind::Sum, AggregateKind::Avg, AggregateKind::Min, AggregateKind::Max] {
        let result = evaluate_partition_aggregate(&partition, kind, Some("score")).unwrap();
        assert_eq!(result, vec![Value::Null; 2], "{}", kind.name());
    }
}

#[test]
fn test_avg_rejects_text() {
    let records = vec![Record::new().with("fare", 1.0), Record::new().with("fare", "n/a")];
    let partition = sorted_partition(&records, &[]);

    let err = evaluate_partition_aggregate(&partition, AggregateKind::Avg, Some("fare")).unwrap_err();

    assert_eq!(
        err,
        SchemaError::TypeMismatch {
            field: "fare".to_string(),
            expected: "NUMERIC".to_string(),
            found: "TEXT".to_string(),
            record_index: 1,
        }
    );
}

#[test]
fn test_evaluate_window_function_rounds_output() {
    let records = make_test_records(vec![1, 2, 2]);
    let partition = sorted_partition(&records, &[]);
    let spec = WindowFunctionSpec::new(
        "avg_score",
        WindowFunction::PartitionAggregate { aggregate: AggregateKind::Avg, field: Some("score".to_string()) },
    )
    .rounded(2);

    let result = evaluate_window_function(&partition, &spec).unwrap();

    assert_eq!(result, vec![Value::Numeric(1.67); 3]);
}

#[test]
fn test_evaluate_window_function_rejects_zero_buckets() {
    let records = make_test_records(vec![1, 2]);
    let partition = sorted_partition(&records, &score_desc());
    let spec = WindowFunctionSpec::new("q", WindowFunction::Ntile { buckets: 0 });

    let err = evaluate_window_function(&partition, &spec).unwrap_err();

    assert!(matches!(
        err,
        crate::EngineError::Configuration(crate::ConfigurationError::NonPositiveBucketCount { .. })
    ));
}

#[test]
fn test_evaluate_window_function_wraps_schema_error_with_partition_key() {
    let records = vec![Record::new().with("driver", "A").with("score", 1)];
    let partitions = partition_records(&records, &["driver".to_string()]).unwrap();
    let spec = WindowFunctionSpec::new("first", WindowFunction::FirstValue { field: "fare".to_string() });

    let err = evaluate_window_function(&partitions[0], &spec).unwrap_err();

    match err {
        crate::EngineError::InPartition { partition_key, source } => {
            assert_eq!(partition_key, vec![Value::from("A")]);
            assert_eq!(source.field(), "fare");
        }
        other => panic!("unexpected error: {other}"),
    }
}
