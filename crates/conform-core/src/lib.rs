//! Conform Core
//!
//! A recursive, synchronous structural validator for nested JSON values.
//! A schema mirrors the shape of the data it describes; each leaf is a type
//! tag, a predicate, an array schema or a nested object schema. Validation
//! returns `None` when the value conforms, or the first failure as a
//! [`ValidationError`] naming the offending location.
//!
//! ## Schemas
//!
//! - **Type tags** (`"string"`, `"?number"`, `"*boolean"`, `"*?object"`):
//!   a category name with optional-then-nullable markers.
//! - **Predicates**: decision closures that see the value, its parent, the
//!   options and its location. See [`combinators`] for ready-made ones.
//! - **Array schemas**: every element must match one element schema.
//! - **Object schemas**: declared keys are checked in order; undeclared
//!   keys are rejected unless [`ValidationOptions::allow_excess_keys`] is set.
//!
//! ## Example
//!
//! ```rust
//! use conform_core::{combinators, validate, ObjectSchema, SchemaNode};
//! use serde_json::json;
//!
//! let schema: SchemaNode = ObjectSchema::new()
//!     .field("name", SchemaNode::tag("string").unwrap())
//!     .field("age", combinators::is_integer())
//!     .field("isAdmin", SchemaNode::tag("boolean").unwrap())
//!     .into();
//!
//! let ok = validate(&json!({"name": "bob", "age": 18, "isAdmin": false}), &schema, None, None).unwrap();
//! assert!(ok.is_none());
//!
//! let err = validate(&json!({"name": "bob", "age": 18.5, "isAdmin": false}), &schema, None, None)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(err.keychain.as_deref(), Some("age"));
//! assert_eq!(err.message, "Expected an integer.");
//! ```

pub mod combinators;
pub mod error;
pub mod keychain;
pub mod options;
pub mod predicate;
mod resolver;
pub mod schema;
pub mod type_tag;
pub mod validator;
pub mod value;
mod walker;

pub use error::{AuthoringError, Error, Result, ValidationError};
pub use keychain::{KeyChain, ROOT_LEVEL};
pub use options::ValidationOptions;
pub use predicate::{Predicate, PredicateContext, Verdict};
pub use schema::{ErrorTemplate, ObjectSchema, SchemaNode};
pub use type_tag::{TypeCategory, TypeTag};
pub use validator::{assert, validate, Validator};
pub use walker::Outcome;
