//! Hash implementation for Value

use std::hash::{Hash, Hasher};

use crate::value::Value;

/// Hash implementation for Value
///
/// Must agree with the `Eq` implementation:
/// - All NaN values hash the same
/// - `0.0` and `-0.0` hash the same
/// - NULL hashes to its discriminant only
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Integer(i) => i.hash(state),
            Value::Numeric(f) => {
                if f.is_nan() {
                    f64::NAN.to_bits().hash(state);
                } else if *f == 0.0 {
                    0.0f64.to_bits().hash(state);
                } else {
                    f.to_bits().hash(state);
                }
            }
            Value::Text(s) => s.hash(state),
            Value::Timestamp(ts) => ts.hash(state),
            Value::Null => {}
        }
    }
}
