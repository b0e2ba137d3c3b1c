//! Membership and identity predicates

use serde_json::Value;

use crate::predicate::Predicate;
use crate::value::{describe, loosely_equal, same_value};

/// Strings are listed without quotes
fn listed(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Value equal to one of `values`
pub fn is_in<I, V>(values: I) -> Predicate
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let message = format!(
        "Expected any of {}.",
        values.iter().map(listed).collect::<Vec<_>>().join(", ")
    );
    Predicate::new(move |v| v.is_some_and(|v| values.iter().any(|candidate| loosely_equal(v, candidate))))
        .with_message(message)
}

/// Same value as `expected`; `0` and `-0` differ
pub fn is(expected: impl Into<Value>) -> Predicate {
    let expected = expected.into();
    let message = format!("Expected value to be {}.", describe(Some(&expected)));
    Predicate::new(move |v| v.is_some_and(|v| same_value(v, &expected))).with_message(message)
}

pub fn is_not(unexpected: impl Into<Value>) -> Predicate {
    let unexpected = unexpected.into();
    let message = format!("Expected value not to be {}.", describe(Some(&unexpected)));
    Predicate::new(move |v| !v.is_some_and(|v| same_value(v, &unexpected))).with_message(message)
}

/// Equal to `expected`, comparing numbers by magnitude
pub fn equal_to(expected: impl Into<Value>) -> Predicate {
    let expected = expected.into();
    let message = format!("Expected value equal to {}.", describe(Some(&expected)));
    Predicate::new(move |v| v.is_some_and(|v| loosely_equal(v, &expected))).with_message(message)
}

pub fn not_equal_to(unexpected: impl Into<Value>) -> Predicate {
    let unexpected = unexpected.into();
    let message = format!("Expected value not equal to {}.", describe(Some(&unexpected)));
    Predicate::new(move |v| !v.is_some_and(|v| loosely_equal(v, &unexpected))).with_message(message)
}
