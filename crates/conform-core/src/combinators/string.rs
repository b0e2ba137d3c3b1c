//! String predicates

use regex::Regex;
use serde_json::Value;

use crate::error::{AuthoringError, Result};
use crate::predicate::Predicate;

/// String whose length in characters is within `lower..=upper`
pub fn is_bounded_string(lower: usize, upper: usize) -> Predicate {
    Predicate::new(move |v| {
        v.and_then(Value::as_str)
            .is_some_and(|s| (lower..=upper).contains(&s.chars().count()))
    })
    .with_message(format!("Expected a string with length between {} and {}.", lower, upper))
}

/// String matching `re` anywhere
pub fn regex(re: Regex) -> Predicate {
    let message = format!("Expected string to match /{}/.", re.as_str());
    Predicate::new(move |v| v.and_then(Value::as_str).is_some_and(|s| re.is_match(s))).with_message(message)
}

/// Compile `pattern` and build a [`regex`] predicate from it
pub fn pattern(pattern: &str) -> Result<Predicate> {
    let re = Regex::new(pattern).map_err(|e| AuthoringError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(regex(re))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bounded_string() {
        let p = is_bounded_string(2, 4);
        assert!(p.accepts(Some(&json!("ab"))).unwrap());
        assert!(p.accepts(Some(&json!("abcd"))).unwrap());
        assert!(!p.accepts(Some(&json!("a"))).unwrap());
        assert!(!p.accepts(Some(&json!("abcde"))).unwrap());
        assert!(!p.accepts(Some(&json!(12))).unwrap());
        assert_eq!(p.message(), Some("Expected a string with length between 2 and 4."));
    }

    #[test]
    fn test_bounded_string_counts_chars() {
        let p = is_bounded_string(3, 3);
        assert!(p.accepts(Some(&json!("héé"))).unwrap());
    }

    #[test]
    fn test_regex() {
        let p = pattern("^[a-z]+$").unwrap();
        assert!(p.accepts(Some(&json!("abc"))).unwrap());
        assert!(!p.accepts(Some(&json!("abc1"))).unwrap());
        assert!(!p.accepts(None).unwrap());
        assert_eq!(p.message(), Some("Expected string to match /^[a-z]+$/."));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = pattern("(unclosed").unwrap_err();
        assert!(matches!(err, AuthoringError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }
}
