//! Validation options
//!
//! Options are an immutable value threaded through every recursive call.
//! [`ValidationOptions::DEFAULT`] is the process-wide default; it is a
//! constant, so there is nothing to mutate after start-up.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthoringError, Result};

/// Options controlling how strictly values are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ValidationOptions {
    /// Accept object keys that the schema does not declare
    pub allow_excess_keys: bool,
    /// Raise instead of returning an error when the root value is not an object
    pub throw_on_non_object: bool,
}

impl ValidationOptions {
    /// The defaults every validator starts from
    pub const DEFAULT: ValidationOptions = ValidationOptions {
        allow_excess_keys: false,
        throw_on_non_object: true,
    };

    const ALLOW_EXCESS_KEYS: &'static str = "allowExcessKeys";
    const THROW_ON_NON_OBJECT: &'static str = "throwOnNonObject";

    /// Set whether excess keys are allowed
    pub fn allow_excess_keys(mut self, allow: bool) -> Self {
        self.allow_excess_keys = allow;
        self
    }

    /// Set whether a non-object root raises
    pub fn throw_on_non_object(mut self, throw: bool) -> Self {
        self.throw_on_non_object = throw;
        self
    }

    /// Merge a partial options object over the defaults
    ///
    /// Unknown keys and non-boolean values are rejected.
    pub fn from_json(partial: &Value) -> Result<Self> {
        Self::DEFAULT.merge(partial)
    }

    /// Merge a partial options object over these options
    pub fn merge(self, partial: &Value) -> Result<Self> {
        let map = match partial {
            Value::Object(map) => map,
            Value::Null => return Ok(self),
            other => return Err(AuthoringError::InvalidOptions(other.to_string())),
        };

        let mut merged = self;
        for (key, value) in map {
            let slot = match key.as_str() {
                Self::ALLOW_EXCESS_KEYS => &mut merged.allow_excess_keys,
                Self::THROW_ON_NON_OBJECT => &mut merged.throw_on_non_object,
                _ => return Err(AuthoringError::unknown_option(key.as_str())),
            };

            *slot = value.as_bool().ok_or_else(|| AuthoringError::InvalidOptionValue {
                option: key.clone(),
                value: value.to_string(),
            })?;
        }

        Ok(merged)
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = ValidationOptions::default();
        assert!(!options.allow_excess_keys);
        assert!(options.throw_on_non_object);
        assert_eq!(options, ValidationOptions::DEFAULT);
    }

    #[test]
    fn test_from_json_overrides() {
        let options = ValidationOptions::from_json(&json!({"throwOnNonObject": false})).unwrap();
        assert!(!options.throw_on_non_object);
        assert!(!options.allow_excess_keys);
        // the shared default is untouched
        assert!(ValidationOptions::DEFAULT.throw_on_non_object);
    }

    #[test]
    fn test_from_json_rejects_unknown_key() {
        let err = ValidationOptions::from_json(&json!({"invalidKey": true})).unwrap_err();
        assert_eq!(err, AuthoringError::UnknownOption("invalidKey".to_string()));
    }

    #[test]
    fn test_from_json_rejects_non_boolean() {
        let err = ValidationOptions::from_json(&json!({"throwOnNonObject": "blah"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[conform] Invalid option value of \"blah\" for \"throwOnNonObject\", expected boolean."
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            ValidationOptions::from_json(&json!([true])),
            Err(AuthoringError::InvalidOptions(_))
        ));
        assert_eq!(ValidationOptions::from_json(&Value::Null).unwrap(), ValidationOptions::DEFAULT);
    }

    #[test]
    fn test_serde_config() {
        let options: ValidationOptions = serde_json::from_str(r#"{"allowExcessKeys": true}"#).unwrap();
        assert!(options.allow_excess_keys);
        assert!(options.throw_on_non_object);

        let rejected: std::result::Result<ValidationOptions, _> =
            serde_json::from_str(r#"{"strict": true}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_builder() {
        let options = ValidationOptions::DEFAULT
            .allow_excess_keys(true)
            .throw_on_non_object(false);
        assert!(options.allow_excess_keys);
        assert!(!options.throw_on_non_object);
    }
}
