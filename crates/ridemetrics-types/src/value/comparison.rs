//! Comparison implementations for Value

use std::cmp::Ordering;

use crate::value::Value;

impl Value {
    /// Compare two values with SQL semantics
    ///
    /// - NULL on either side returns None (SQL UNKNOWN)
    /// - Integer and numeric compare numerically
    /// - NaN is greater than every other number and equal to itself
    /// - Mismatched kinds are incomparable and return None
    pub fn sql_cmp(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Integer(_), Numeric(_)) | (Numeric(_), Integer(_)) | (Numeric(_), Numeric(_)) => {
                Some(compare_f64(self.as_f64()?, other.as_f64()?))
            }
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Position of the value's kind in the cross-kind total order
    ///
    /// NULL < numbers < text < timestamps. Integer and numeric share a rank
    /// so they interleave numerically.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Integer(_) | Value::Numeric(_) => 1,
            Value::Text(_) => 2,
            Value::Timestamp(_) => 3,
        }
    }
}

/// Total order over f64 where NaN is greater than all numbers and equal to itself
pub(crate) fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Equality for grouping purposes
///
/// Unlike SQL comparison, NULL equals NULL and NaN equals NaN, so that
/// partition keys and group labels behave as ordinary map keys. Integer and
/// numeric values are distinct kinds here even when numerically equal; the
/// window sort uses [`Value::sql_cmp`] for numeric interleaving instead.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total ordering used for map keys and deterministic output
///
/// NULL sorts first, then numbers, text and timestamps. Within numbers,
/// integers sort before numerics that compare equal so the order stays
/// consistent with [`PartialEq`].
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Numeric(a), Numeric(b)) => compare_f64(*a, *b),
            (Integer(a), Numeric(b)) => compare_f64(*a as f64, *b).then(Ordering::Less),
            (Numeric(a), Integer(b)) => compare_f64(*a, *b as f64).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}
