//! Error message resolution
//!
//! When a leaf fails, its message is picked by priority:
//!
//! 1. a string override in the caller's error template at this location;
//! 2. what the predicate itself reported (an ad hoc message or a fully
//!    resolved nested error);
//! 3. the message bound to the predicate;
//! 4. a built-in default.

use serde_json::Value;

use crate::error::{AuthoringError, Result, ValidationError};
use crate::keychain::KeyChain;
use crate::predicate::{Predicate, Verdict};
use crate::schema::ErrorTemplate;
use crate::type_tag::TypeTag;

pub(crate) const OPAQUE_PREDICATE: &str = "The value was invalid, but no error message is available.";
pub(crate) const NON_OBJECT_ROOT: &str = "Non-object provided for validation.";
pub(crate) const EXPECTED_OBJECT: &str =
    "Object does not match structure of schema, expected this location to have an object.";
pub(crate) const NOT_AN_ARRAY: &str = "Value was not an array.";

/// A failing leaf and what it reported
#[derive(Debug)]
pub(crate) enum LeafFailure<'a> {
    Tag(&'a TypeTag),
    Predicate {
        predicate: &'a Predicate,
        verdict: Verdict,
    },
}

/// The string override at this location, if the template has one
///
/// A nested template where a leaf was expected means the template does not
/// mirror the schema.
pub(crate) fn template_override<'t>(
    template: Option<&'t ErrorTemplate>,
    keychain: &KeyChain,
) -> Result<Option<&'t str>> {
    match template {
        None => Ok(None),
        Some(ErrorTemplate::Message(message)) => Ok(Some(message.as_str())),
        Some(ErrorTemplate::Fields(_)) => Err(AuthoringError::template_shape(keychain.to_string())),
    }
}

/// Resolve the error for a failing leaf
pub(crate) fn resolve(
    value: Option<&Value>,
    failure: LeafFailure<'_>,
    template: Option<&ErrorTemplate>,
    keychain: &KeyChain,
) -> Result<ValidationError> {
    if let Some(message) = template_override(template, keychain)? {
        return Ok(ValidationError::new(message, keychain.render(), value));
    }

    let message = match failure {
        LeafFailure::Tag(tag) => tag.default_message(),
        LeafFailure::Predicate { verdict: Verdict::Error(err), .. } => return Ok(err),
        LeafFailure::Predicate { verdict: Verdict::Message(message), .. } => message,
        LeafFailure::Predicate { predicate, .. } => predicate
            .message()
            .unwrap_or(OPAQUE_PREDICATE)
            .to_string(),
    };

    Ok(ValidationError::new(message, keychain.render(), value))
}

/// An error produced by the walker itself rather than by a leaf
pub(crate) fn structural(message: impl Into<String>, value: Option<&Value>, keychain: &KeyChain) -> ValidationError {
    ValidationError::new(message, keychain.render(), value)
}

/// The aggregated error naming every undeclared key
pub(crate) fn excess_keys(keys: &[String], value: Option<&Value>, keychain: &KeyChain) -> ValidationError {
    structural(
        format!("These keys were not expected inside this object: {}.", keys.join(", ")),
        value,
        keychain,
    )
}
