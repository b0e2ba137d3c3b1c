//! Host value model
//!
//! Values are `serde_json::Value`. A value that is not present at all (a
//! missing key) is modelled as `None` in an `Option<&Value>`, which keeps
//! "absent" and "null" distinct.

use serde_json::{Number, Value};

/// Largest integer that survives a round trip through an IEEE-754 double
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Closed set of value categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Absent,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a possibly-absent value
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Absent,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
        }
    }

    /// Whether values of this kind are non-null structural containers
    pub fn is_structural(self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

/// Render a possibly-absent value for an error message
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => v.to_string(),
    }
}

/// The value as a finite number, if it is one
pub fn finite_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// The value as a safe integer, if it is one
///
/// Integral floats such as `18.0` count as integers.
pub fn safe_integer(value: Option<&Value>) -> Option<i64> {
    let Some(Value::Number(n)) = value else {
        return None;
    };

    if let Some(i) = n.as_i64() {
        return (i.unsigned_abs() <= MAX_SAFE_INTEGER).then_some(i);
    }
    if let Some(u) = n.as_u64() {
        return (u <= MAX_SAFE_INTEGER).then_some(u as i64);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64)
        .map(|f| f as i64)
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Equality where numbers compare by magnitude (`1` equals `1.0`)
pub fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

/// Same-value identity: like [`loosely_equal`], but `0` and `-0` differ
pub fn same_value(a: &Value, b: &Value) -> bool {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        if let (Some(fx), Some(fy)) = (x.as_f64(), y.as_f64()) {
            if fx == 0.0 && fy == 0.0 {
                return fx.is_sign_negative() == fy.is_sign_negative();
            }
        }
    }
    loosely_equal(a, b)
}
