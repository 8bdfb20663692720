use ridemetrics_types::SchemaError;

use super::*;

fn ride_records() -> Vec<Record> {
    vec![
        Record::new().with("driver", "B").with("fare", 10),
        Record::new().with("driver", "A").with("fare", 20),
        Record::new().with("driver", "B").with("fare", 30),
        Record::new().with("driver", Value::Null).with("fare", 40),
        Record::new().with("driver", "A").with("fare", 50),
        Record::new().with("driver", Value::Null).with("fare", 60),
    ]
}

#[test]
fn test_partition_records_no_partition_by() {
    let records = make_test_records(vec![1, 2, 3]);
    let partitions = partition_records(&records, &[]).unwrap();

    assert_eq!(partitions.len(), 1);
    assert_eq!(partitions[0].len(), 3);
    assert!(partitions[0].key.is_empty());
    assert_eq!(partitions[0].original_indices, vec![0, 1, 2]);
}

#[test]
fn test_partition_records_empty_input_keeps_single_partition() {
    let partitions = partition_records(&[], &[]).unwrap();

    assert_eq!(partitions.len(), 1);
    assert!(partitions[0].is_empty());
}

#[test]
fn test_partition_records_first_appearance_order() {
    let records = ride_records();
    let partitions = partition_records(&records, &["driver".to_string()]).unwrap();

    assert_eq!(partitions.len(), 3);
    assert_eq!(partitions[0].key, vec![Value::from("B")]);
    assert_eq!(partitions[1].key, vec![Value::from("A")]);
    assert_eq!(partitions[2].key, vec![Value::Null]);
}

#[test]
fn test_partition_records_groups_numerically_equal_keys() {
    let records = vec![
        Record::new().with("zone", 1).with("fare", 10),
        Record::new().with("zone", 1.0).with("fare", 20),
        Record::new().with("zone", 2.5).with("fare", 30),
        Record::new().with("zone", -0.0).with("fare", 40),
        Record::new().with("zone", 0).with("fare", 50),
    ];
    let partitions = partition_records(&records, &["zone".to_string()]).unwrap();

    assert_eq!(partitions.len(), 3);
    assert_eq!(partitions[0].original_indices, vec![0, 1]);
    // first-seen value is the reported key
    assert_eq!(partitions[0].key, vec![Value::Integer(1)]);
    assert_eq!(partitions[1].original_indices, vec![2]);
    assert_eq!(partitions[2].original_indices, vec![3, 4]);
    assert_eq!(partitions[2].key, vec![Value::Numeric(-0.0)]);
}

#[test]
fn test_partition_records_preserves_input_order_and_indices() {
    let records = ride_records();
    let partitions = partition_records(&records, &["driver".to_string()]).unwrap();

    assert_eq!(partitions[0].original_indices, vec![0, 2]);
    assert_eq!(partitions[1].original_indices, vec![1, 4]);
    // NULL keys group together
    assert_eq!(partitions[2].original_indices, vec![3, 5]);
    assert_eq!(partitions[1].rows[1].get("fare"), Some(&Value::Integer(50)));
}

#[test]
fn test_partition_records_missing_field() {
    let records = vec![
        Record::new().with("driver", "A"),
        Record::new().with("fare", 10),
    ];

    let err = partition_records(&records, &["driver".to_string()]).unwrap_err();
    assert_eq!(err, SchemaError::MissingField { field: "driver".to_string(), record_index: 1 });
}
