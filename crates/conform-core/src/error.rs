//! Error types for conform
//!
//! Two disjoint failure classes exist:
//!
//! - [`AuthoringError`]: the schema, options or error template is malformed.
//!   Always surfaced as `Err`, never as data.
//! - [`ValidationError`]: the value does not satisfy the schema. Returned as
//!   data (`Ok(Some(..))`) by the walker.
//!
//! [`Error`] wraps both for callers that want a single failure type, such as
//! the `assert` wrapper.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::value::describe;

/// A mistake made by whoever wrote the schema, options or error template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthoringError {
    /// An option key that the validator does not know
    #[error("[conform] Invalid option \"{0}\" passed to Validator constructor.")]
    UnknownOption(String),

    /// A known option key with a non-boolean value
    #[error("[conform] Invalid option value of {value} for \"{option}\", expected boolean.")]
    InvalidOptionValue {
        /// The option key
        option: String,
        /// The rejected value, rendered
        value: String,
    },

    /// The options document itself was not an object
    #[error("[conform] Invalid options {0}, expected an object.")]
    InvalidOptions(String),

    /// A type tag written with the nullable marker before the optional one
    #[error("[conform] Invalid type descriptor \"{0}\". Did you mean to start with \"*?\".")]
    MisorderedModifiers(String),

    /// A type tag naming no known category
    #[error("[conform] Invalid type descriptor \"{0}\". This is not a valid type descriptor.")]
    InvalidTypeTag(String),

    /// An array schema that does not wrap exactly one element schema
    #[error("[conform] Invalid schema at {keychain}, array must have exactly one value.")]
    ArraySchemaArity {
        /// Rendered location inside the schema
        keychain: String,
    },

    /// A schema leaf that is neither a type tag, an array nor an object
    #[error("[conform] Unknown/unusable schema value {value} at {keychain}.")]
    UnusableSchema {
        /// Rendered location inside the schema
        keychain: String,
        /// The offending schema value, rendered
        value: String,
    },

    /// An error template leaf that is not a string
    #[error("[conform] Invalid error message {value} at {keychain}. Error messages must be strings.")]
    InvalidTemplate {
        /// Rendered location inside the template
        keychain: String,
        /// The offending template value, rendered
        value: String,
    },

    /// A nested template found where the schema has a leaf
    #[error("[conform] Invalid error template at {keychain}. Expected an error message or nothing, but got an object.")]
    TemplateShape {
        /// Rendered location of the mismatch
        keychain: String,
    },

    /// A non-object root value while `throw_on_non_object` is enabled
    #[error("[conform] Non-object {0} provided.")]
    NonObjectRoot(String),

    /// A regular expression that failed to compile
    #[error("[conform] Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern source
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },
}

impl AuthoringError {
    /// Create an unknown-option error
    pub fn unknown_option(option: impl Into<String>) -> Self {
        AuthoringError::UnknownOption(option.into())
    }

    /// Create a template-shape error at a rendered location
    pub fn template_shape(keychain: impl Into<String>) -> Self {
        AuthoringError::TemplateShape {
            keychain: keychain.into(),
        }
    }

    /// Create a non-object root error for the given value
    pub fn non_object_root(value: Option<&Value>) -> Self {
        AuthoringError::NonObjectRoot(describe(value))
    }
}

/// Result type for operations that can only fail through authoring mistakes
pub type Result<T> = std::result::Result<T, AuthoringError>;

/// Report of a value that failed to satisfy its schema
///
/// `keychain` is `None` when the failure is located at the root of the
/// validated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Resolved human-readable message
    pub message: String,
    /// Rendered location of the offending value
    pub keychain: Option<String>,
    /// The offending value, `None` when it was absent
    ///
    /// Omitted from the serialized form when absent, so a serialized `null`
    /// reads back as a present null.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_value")]
    pub value: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>, keychain: Option<String>, value: Option<&Value>) -> Self {
        Self {
            message: message.into(),
            keychain,
            value: value.cloned(),
        }
    }

    /// Whether this error is located at the root of the value
    pub fn is_root(&self) -> bool {
        self.keychain.is_none()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.keychain.as_deref().unwrap_or(crate::keychain::ROOT_LEVEL);
        let separator = if self.message.ends_with('.') { "" } else { "." };
        write!(
            f,
            "[{}]: {}{} Received {}.",
            location,
            self.message,
            separator,
            describe(self.value.as_ref())
        )
    }
}

impl std::error::Error for ValidationError {}

/// Either failure class, for callers that treat invalid data as an error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The schema, options or template was malformed
    #[error(transparent)]
    Authoring(#[from] AuthoringError),

    /// The value failed validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl Error {
    /// Check if this error was caused by the value rather than the schema
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }

    /// The validation error, if this is one
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid(err) => Some(err),
            Error::Authoring(_) => None,
        }
    }
}
