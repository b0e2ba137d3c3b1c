//! Validation entry points
//!
//! [`validate`] returns the first failure as data; [`assert`] turns it into
//! an `Err`. [`Validator`] carries a fixed set of options for repeated use.

use serde_json::Value;

use crate::error::{Error, Result, ValidationError};
use crate::options::ValidationOptions;
use crate::schema::{ErrorTemplate, SchemaNode};
use crate::walker;

/// Validate `value` against `schema`
///
/// Returns `Ok(None)` when the value conforms, `Ok(Some(err))` describing the
/// first failure otherwise, and `Err` only for authoring mistakes. When
/// `options` is `None`, [`ValidationOptions::DEFAULT`] applies.
pub fn validate(
    value: &Value,
    schema: &SchemaNode,
    template: Option<&ErrorTemplate>,
    options: Option<&ValidationOptions>,
) -> Result<Option<ValidationError>> {
    walker::walk(value, schema, template, options.unwrap_or(&ValidationOptions::DEFAULT))
}

/// Like [`validate`], but an invalid value is an error too
pub fn assert(
    value: &Value,
    schema: &SchemaNode,
    template: Option<&ErrorTemplate>,
    options: Option<&ValidationOptions>,
) -> std::result::Result<(), Error> {
    match validate(value, schema, template, options)? {
        None => Ok(()),
        Some(err) => Err(Error::Invalid(err)),
    }
}

/// A validator with options fixed at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// Validator with the default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Validator from a partial options document such as
    /// `{"allowExcessKeys": true}`
    pub fn from_partial(partial: &Value) -> Result<Self> {
        let options = ValidationOptions::from_json(partial)?;
        tracing::debug!(?options, "Created validator");
        Ok(Self { options })
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validate(
        &self,
        value: &Value,
        schema: &SchemaNode,
        template: Option<&ErrorTemplate>,
    ) -> Result<Option<ValidationError>> {
        validate(value, schema, template, Some(&self.options))
    }

    pub fn assert(
        &self,
        value: &Value,
        schema: &SchemaNode,
        template: Option<&ErrorTemplate>,
    ) -> std::result::Result<(), Error> {
        assert(value, schema, template, Some(&self.options))
    }
}
