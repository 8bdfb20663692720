//! Threshold classification
//!
//! Predicates use SQL comparison: anything compared with NULL is unknown,
//! and unknown never matches. Fields absent from a row read as NULL; field
//! references are checked against the schema before a run starts.

use std::cmp::Ordering;

use ridemetrics_types::{FieldLookup, Value};

use crate::{
    definition::{ClassificationRule, CompareOp, Predicate},
    record::NULL,
};

/// Label for a row under an ordered rule: first matching case, else default
pub fn classify<'r, R: FieldLookup>(row: &R, rule: &'r ClassificationRule) -> &'r str {
    rule.cases
        .iter()
        .find(|case| evaluate_predicate(row, &case.when))
        .map_or(rule.default_label.as_str(), |case| case.label.as_str())
}

pub fn evaluate_predicate<R: FieldLookup>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Compare { field, op, value } => compare(field_value(row, field), *op, value),
        Predicate::CompareFields { left, op, right } => {
            compare(field_value(row, left), *op, field_value(row, right))
        }
        Predicate::Between { field, low, high } => {
            let v = field_value(row, field);
            compare(v, CompareOp::Ge, low) && compare(v, CompareOp::Le, high)
        }
        Predicate::InSet { field, values } => {
            let v = field_value(row, field);
            values.iter().any(|candidate| compare(v, CompareOp::Eq, candidate))
        }
        Predicate::IsNull { field } => field_value(row, field).is_null(),
        Predicate::IsNotNull { field } => !field_value(row, field).is_null(),
        Predicate::All { predicates } => predicates.iter().all(|p| evaluate_predicate(row, p)),
        Predicate::Any { predicates } => predicates.iter().any(|p| evaluate_predicate(row, p)),
        Predicate::Not { predicate } => !evaluate_predicate(row, predicate),
    }
}

fn field_value<'r, R: FieldLookup>(row: &'r R, field: &str) -> &'r Value {
    row.lookup(field).unwrap_or(&NULL)
}

/// Incomparable pairs (NULL, mixed kinds) never satisfy any operator
fn compare(left: &Value, op: CompareOp, right: &Value) -> bool {
    let Some(ordering) = left.sql_cmp(right) else {
        return false;
    };

    match op {
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use ridemetrics_types::Record;

    use super::*;

    fn tier_rule() -> ClassificationRule {
        ClassificationRule::new("performance_tier", "Growth")
            .case(Predicate::le("revenue_rank", 10), "Top")
            .case(Predicate::le("revenue_rank", 30), "Mid")
    }

    fn with_rank(rank: i64) -> Record {
        Record::new().with("revenue_rank", rank)
    }

    #[test]
    fn test_rank_thresholds() {
        let rule = tier_rule();

        assert_eq!(classify(&with_rank(1), &rule), "Top");
        assert_eq!(classify(&with_rank(10), &rule), "Top");
        assert_eq!(classify(&with_rank(11), &rule), "Mid");
        assert_eq!(classify(&with_rank(30), &rule), "Mid");
        assert_eq!(classify(&with_rank(31), &rule), "Growth");
    }

    #[test]
    fn test_first_match_wins_over_narrower_later_case() {
        let rule = ClassificationRule::new("bucket", "C")
            .case(Predicate::le("percentile", 0.5), "A")
            .case(Predicate::le("percentile", 0.2), "B");

        let record = Record::new().with("percentile", 0.1);

        assert_eq!(classify(&record, &rule), "A");
    }

    #[test]
    fn test_null_never_matches_comparison() {
        let rule = ClassificationRule::new("flag", "no data").case(Predicate::gt("idle_hours", 4), "risk");
        let record = Record::new().with("idle_hours", Value::Null);

        assert_eq!(classify(&record, &rule), "no data");
        assert!(!evaluate_predicate(&record, &Predicate::le("idle_hours", 4)));
        // Two-valued negation: NOT of an unknown comparison is true
        assert!(evaluate_predicate(&record, &Predicate::negate(Predicate::gt("idle_hours", 4))));
    }

    #[test]
    fn test_integer_and_numeric_compare_numerically() {
        let record = Record::new().with("rank", 2).with("rating", 4.5);

        assert!(evaluate_predicate(&record, &Predicate::eq("rank", 2.0)));
        assert!(evaluate_predicate(&record, &Predicate::gt("rating", 4)));
        assert!(evaluate_predicate(&record, &Predicate::compare_fields("rating", CompareOp::Gt, "rank")));
    }

    #[test]
    fn test_between_is_inclusive() {
        let p = Predicate::between("rating", 4.5, 4.7);

        assert!(evaluate_predicate(&Record::new().with("rating", 4.5), &p));
        assert!(evaluate_predicate(&Record::new().with("rating", 4.7), &p));
        assert!(!evaluate_predicate(&Record::new().with("rating", 4.8), &p));
    }

    #[test]
    fn test_in_set_and_text_equality() {
        let p = Predicate::in_set("tier", ["Gold", "Platinum"]);

        assert!(evaluate_predicate(&Record::new().with("tier", "Gold"), &p));
        assert!(!evaluate_predicate(&Record::new().with("tier", "Silver"), &p));
        assert!(!evaluate_predicate(&Record::new().with("tier", Value::Null), &p));
    }

    #[test]
    fn test_mixed_kinds_do_not_match() {
        let record = Record::new().with("tier", "1");

        assert!(!evaluate_predicate(&record, &Predicate::eq("tier", 1)));
        assert!(!evaluate_predicate(&record, &Predicate::compare("tier", CompareOp::Ne, 1)));
    }

    #[test]
    fn test_combinators() {
        let record = Record::new().with("next_ride_start", "2024-01-01").with("idle_hours", 3.0);
        let warning = Predicate::all(vec![Predicate::is_not_null("next_ride_start"), Predicate::gt("idle_hours", 2)]);
        let either = Predicate::any(vec![Predicate::is_null("next_ride_start"), Predicate::gt("idle_hours", 4)]);

        assert!(evaluate_predicate(&record, &warning));
        assert!(!evaluate_predicate(&record, &either));
        assert!(evaluate_predicate(&record, &Predicate::all(vec![])));
        assert!(!evaluate_predicate(&record, &Predicate::any(vec![])));
    }

    #[test]
    fn test_rule_without_cases_uses_default() {
        let rule = ClassificationRule::new("segment", "Basic");
        assert_eq!(classify(&Record::new(), &rule), "Basic");
    }
}
