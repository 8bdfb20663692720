use super::*;

// ===== ROW_NUMBER Tests =====

#[test]
fn test_row_number_simple() {
    let records = make_test_records(vec![10, 20, 30, 40, 50]);
    let partition = sorted_partition(&records, &score_desc());

    let result = evaluate_row_number(&partition);

    assert_eq!(ints(&result), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_row_number_ignores_ties() {
    let records = make_test_records(vec![7, 7, 7]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_row_number(&partition)), vec![1, 2, 3]);
}

// ===== RANK Tests =====

#[test]
fn test_rank_with_ties() {
    // Scores: 95, 90, 90, 85
    // Expected ranks: 1, 2, 2, 4
    let records = make_test_records(vec![95, 90, 90, 85]);
    let partition = sorted_partition(&records, &score_desc());

    let result = evaluate_rank(&partition);

    assert_eq!(result.len(), 4);
    assert_eq!(result[0], Value::Integer(1)); // 95 -> rank 1
    assert_eq!(result[1], Value::Integer(2)); // 90 -> rank 2
    assert_eq!(result[2], Value::Integer(2)); // 90 -> rank 2 (tie)
    assert_eq!(result[3], Value::Integer(4)); // 85 -> rank 4 (gap at 3)
}

#[test]
fn test_rank_no_ties() {
    let records = make_test_records(vec![4, 3, 2, 1]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_rank(&partition)), vec![1, 2, 3, 4]);
}

#[test]
fn test_rank_and_dense_rank_trailing_tie() {
    // {10, 10, 30} descending: 30, 10, 10
    let records = make_test_records(vec![10, 10, 30]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(partition.original_indices, vec![2, 0, 1]);
    assert_eq!(ints(&evaluate_rank(&partition)), vec![1, 2, 2]);
    assert_eq!(ints(&evaluate_dense_rank(&partition)), vec![1, 2, 2]);

    // Ascending puts the tie first
    let partition = sorted_partition(&records, &[OrderByItem::asc("score")]);
    assert_eq!(ints(&evaluate_rank(&partition)), vec![1, 1, 3]);
    assert_eq!(ints(&evaluate_dense_rank(&partition)), vec![1, 1, 2]);
}

#[test]
fn test_rank_and_dense_rank_top_tie() {
    // {30, 30, 10} descending: ranks [1,1,3], dense [1,1,2]
    let records = make_test_records(vec![10, 30, 30]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_rank(&partition)), vec![1, 1, 3]);
    assert_eq!(ints(&evaluate_dense_rank(&partition)), vec![1, 1, 2]);
}

#[test]
fn test_rank_null_keys_are_peers() {
    let records = make_nullable_records(vec![None, Some(5), None]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_rank(&partition)), vec![1, 2, 2]);
}

// ===== DENSE_RANK Tests =====

#[test]
fn test_dense_rank_with_ties() {
    let records = make_test_records(vec![95, 90, 90, 85]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_dense_rank(&partition)), vec![1, 2, 2, 3]);
}

#[test]
fn test_single_row_ranks() {
    let records = make_test_records(vec![42]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_row_number(&partition)), vec![1]);
    assert_eq!(ints(&evaluate_rank(&partition)), vec![1]);
    assert_eq!(ints(&evaluate_dense_rank(&partition)), vec![1]);
}

// ===== NTILE Tests =====

#[test]
fn test_ntile_even_distribution() {
    // 8 rows into 4 buckets: [1,1,2,2,3,3,4,4]
    let records = make_test_records(vec![1, 2, 3, 4, 5, 6, 7, 8]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_ntile(&partition, 4)), vec![1, 1, 2, 2, 3, 3, 4, 4]);
}

#[test]
fn test_ntile_uneven_distribution() {
    // 7 rows into 4 buckets: sizes [2,2,2,1]
    let records = make_test_records(vec![1, 2, 3, 4, 5, 6, 7]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_ntile(&partition, 4)), vec![1, 1, 2, 2, 3, 3, 4]);
}

#[test]
fn test_ntile_more_buckets_than_rows() {
    let records = make_test_records(vec![1, 2, 3]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_ntile(&partition, 5)), vec![1, 2, 3]);
}

#[test]
fn test_ntile_single_bucket() {
    let records = make_test_records(vec![1, 2, 3]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_ntile(&partition, 1)), vec![1, 1, 1]);
}

#[test]
fn test_ntile_ignores_ties() {
    // Bucket boundaries fall on positions, not on peer groups
    let records = make_test_records(vec![5, 5, 5, 5]);
    let partition = sorted_partition(&records, &score_desc());

    assert_eq!(ints(&evaluate_ntile(&partition, 2)), vec![1, 1, 2, 2]);
}
