//! Reusable predicates and predicate combinators
//!
//! Every helper returns a [`Predicate`](crate::Predicate) carrying a bound
//! message, so failures read well without an error template.

mod logic;
mod membership;
mod number;
mod string;

pub use logic::{all_of, any, any_of, nullable, optional, NO_ALTERNATIVE};
pub use membership::{equal_to, is, is_in, is_not, not_equal_to};
pub use number::{
    approx, gt, gt_int, gte, gte_int, is_bounded_integer, is_integer, is_positive, is_positive_integer,
    is_positive_non_zero, is_positive_non_zero_integer, lt, lt_int, lte, lte_int,
};
pub use string::{is_bounded_string, pattern, regex};
