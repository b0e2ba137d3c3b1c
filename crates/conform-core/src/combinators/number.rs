//! Numeric predicates
//!
//! "Number" means a finite JSON number; "integer" means a safe integer, which
//! includes integral floats such as `18.0`.

use crate::predicate::Predicate;
use crate::value::{finite_number, safe_integer};

pub fn is_integer() -> Predicate {
    Predicate::new(|v| safe_integer(v).is_some()).with_message("Expected an integer.")
}

pub fn gt(bound: f64) -> Predicate {
    Predicate::new(move |v| finite_number(v).is_some_and(|n| n > bound))
        .with_message(format!("Expected number to be greater than {}.", bound))
}

pub fn gte(bound: f64) -> Predicate {
    Predicate::new(move |v| finite_number(v).is_some_and(|n| n >= bound))
        .with_message(format!("Expected number to be greater than or equal to {}.", bound))
}

pub fn lt(bound: f64) -> Predicate {
    Predicate::new(move |v| finite_number(v).is_some_and(|n| n < bound))
        .with_message(format!("Expected number to be less than {}.", bound))
}

pub fn lte(bound: f64) -> Predicate {
    Predicate::new(move |v| finite_number(v).is_some_and(|n| n <= bound))
        .with_message(format!("Expected number to be less than or equal to {}.", bound))
}

pub fn gt_int(bound: i64) -> Predicate {
    Predicate::new(move |v| safe_integer(v).is_some_and(|n| n > bound))
        .with_message(format!("Expected number to be an integer and greater than {}.", bound))
}

pub fn gte_int(bound: i64) -> Predicate {
    Predicate::new(move |v| safe_integer(v).is_some_and(|n| n >= bound)).with_message(format!(
        "Expected number to be an integer and greater than or equal to {}.",
        bound
    ))
}

pub fn lt_int(bound: i64) -> Predicate {
    Predicate::new(move |v| safe_integer(v).is_some_and(|n| n < bound))
        .with_message(format!("Expected number to be an integer and less than {}.", bound))
}

pub fn lte_int(bound: i64) -> Predicate {
    Predicate::new(move |v| safe_integer(v).is_some_and(|n| n <= bound)).with_message(format!(
        "Expected number to be an integer and less than or equal to {}.",
        bound
    ))
}

/// Zero or greater
pub fn is_positive() -> Predicate {
    Predicate::new(|v| finite_number(v).is_some_and(|n| n >= 0.0)).with_message("Expected a positive number.")
}

pub fn is_positive_non_zero() -> Predicate {
    Predicate::new(|v| finite_number(v).is_some_and(|n| n > 0.0)).with_message("Expected a positive non-zero number.")
}

/// Zero or greater
pub fn is_positive_integer() -> Predicate {
    Predicate::new(|v| safe_integer(v).is_some_and(|n| n >= 0)).with_message("Expected a positive integer.")
}

pub fn is_positive_non_zero_integer() -> Predicate {
    Predicate::new(|v| safe_integer(v).is_some_and(|n| n > 0)).with_message("Expected a positive non-zero integer.")
}

/// Integer within `lower..=upper`
pub fn is_bounded_integer(lower: i64, upper: i64) -> Predicate {
    Predicate::new(move |v| safe_integer(v).is_some_and(|n| (lower..=upper).contains(&n)))
        .with_message(format!("Expected an integer between {} and {}.", lower, upper))
}

/// Number within `tolerance` of `target`, inclusive
pub fn approx(target: f64, tolerance: f64) -> Predicate {
    Predicate::new(move |v| finite_number(v).is_some_and(|n| (n - target).abs() <= tolerance))
        .with_message(format!("Expected a number within {} of {}.", tolerance, target))
}
