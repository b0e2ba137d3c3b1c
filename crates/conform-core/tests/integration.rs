//! Integration tests for conform-core
//!
//! Exercises the public API end to end:
//! - Object, array and nested array schemas
//! - Excess key aggregation and sibling short-circuiting
//! - Error templates and authoring errors
//! - Combinator laws

use conform_core::combinators::{self, all_of, any_of, is_integer, is_positive_integer};
use conform_core::{
    assert, validate, AuthoringError, Error, ErrorTemplate, ObjectSchema, Predicate, SchemaNode,
    ValidationOptions, Validator,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Helper to build the user schema used across tests
fn user_schema() -> SchemaNode {
    ObjectSchema::new()
        .field("name", SchemaNode::tag("string").unwrap())
        .field("age", is_integer())
        .field("isAdmin", SchemaNode::tag("boolean").unwrap())
        .into()
}

#[test]
fn test_end_to_end_valid_user() {
    let value = json!({"name": "bob", "age": 18, "isAdmin": false});
    assert_eq!(validate(&value, &user_schema(), None, None).unwrap(), None);
}

#[test]
fn test_end_to_end_non_integer_age() {
    let value = json!({"name": "bob", "age": 18.5, "isAdmin": false});
    let err = validate(&value, &user_schema(), None, None).unwrap().unwrap();

    assert_eq!(err.keychain.as_deref(), Some("age"));
    assert!(err.message.contains("integer"));
    assert_eq!(err.value, Some(json!(18.5)));
    assert_eq!(err.to_string(), "[age]: Expected an integer. Received 18.5.");
}

#[test]
fn test_end_to_end_excess_keys() {
    let value = json!({"name": "bob", "age": 18, "isAdmin": false, "foo1": 1, "foo2": 2});
    let err = validate(&value, &user_schema(), None, None).unwrap().unwrap();

    assert!(err.is_root());
    assert_eq!(err.message, "These keys were not expected inside this object: foo1, foo2.");
    assert!(err.to_string().starts_with("[<root level>]: "));
}

#[test]
fn test_nested_2d_array() {
    let schema: SchemaNode = ObjectSchema::new()
        .field("2dArray", SchemaNode::array_of(SchemaNode::array_of(is_positive_integer())))
        .into();

    let value = json!({"2dArray": [[1, 2], [3, 4], [5.5, 6]]});
    let err = validate(&value, &schema, None, None).unwrap().unwrap();

    assert_eq!(err.keychain.as_deref(), Some("[2dArray][2][0]"));
    assert_eq!(err.message, "Expected a positive integer.");
    assert_eq!(err.value, Some(json!(5.5)));
}

#[test]
fn test_sibling_short_circuit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema: SchemaNode = ObjectSchema::new()
        .field("a", SchemaNode::tag("string").unwrap())
        .field(
            "b",
            Predicate::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        )
        .into();

    let err = validate(&json!({"a": 5, "b": 1}), &schema, None, None).unwrap().unwrap();
    assert_eq!(err.keychain.as_deref(), Some("a"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_json_schema_with_predicates() {
    let mut schema = match SchemaNode::from_json(&json!({
        "username": "string",
        "email": "*?string",
        "profile": {"bio": "*string"}
    }))
    .unwrap()
    {
        SchemaNode::Object(object) => object,
        other => panic!("unexpected schema {:?}", other),
    };
    schema.insert("level", combinators::is_bounded_integer(1, 100));
    let schema = SchemaNode::from(schema);

    let value = json!({"username": "a", "email": null, "profile": {}, "level": 50});
    assert_eq!(validate(&value, &schema, None, None).unwrap(), None);

    let value = json!({"username": "a", "profile": {"bio": 4}, "level": 50});
    let err = validate(&value, &schema, None, None).unwrap().unwrap();
    assert_eq!(err.keychain.as_deref(), Some("profile.bio"));
    assert_eq!(err.message, "Expected typeof string or no value.");
}

#[test]
fn test_error_template_overrides() {
    let template = ErrorTemplate::from_json(&json!({
        "age": "Age must be a whole number.",
        "name": null
    }))
    .unwrap();

    let value = json!({"name": "bob", "age": 1.5, "isAdmin": false});
    let err = validate(&value, &user_schema(), Some(&template), None).unwrap().unwrap();
    assert_eq!(err.message, "Age must be a whole number.");

    let value = json!({"name": 1, "age": 1, "isAdmin": false});
    let err = validate(&value, &user_schema(), Some(&template), None).unwrap().unwrap();
    assert_eq!(err.message, "Expected typeof string.");
}

#[test]
fn test_error_template_shape_mismatch() {
    let template = ErrorTemplate::fields().field("age", ErrorTemplate::fields().field("inner", "x"));
    let value = json!({"name": "bob", "age": 1.5, "isAdmin": false});

    let err = validate(&value, &user_schema(), Some(&template), None).unwrap_err();
    assert!(matches!(err, AuthoringError::TemplateShape { ref keychain } if keychain == "age"));
}

#[test]
fn test_throw_on_non_object() {
    let err = validate(&json!([1, 2]), &SchemaNode::from_json(&json!({"0": "number"})).unwrap(), None, None);
    assert!(matches!(err, Ok(Some(_))));

    let err = validate(&json!("str"), &user_schema(), None, None).unwrap_err();
    assert_eq!(err.to_string(), "[conform] Non-object \"str\" provided.");

    let options = ValidationOptions::DEFAULT.throw_on_non_object(false);
    let err = validate(&json!("str"), &user_schema(), None, Some(&options)).unwrap().unwrap();
    assert_eq!(err.message, "Non-object provided for validation.");
}

#[test]
fn test_assert_wrapper() {
    let value = json!({"name": "bob", "age": "x", "isAdmin": false});
    match assert(&value, &user_schema(), None, None) {
        Err(Error::Invalid(err)) => assert_eq!(err.keychain.as_deref(), Some("age")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_validator_options_errors() {
    let err = Validator::from_partial(&json!({"invalidKey": true})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "[conform] Invalid option \"invalidKey\" passed to Validator constructor."
    );
    assert!(Validator::from_partial(&json!(["x"])).is_err());
}

#[test]
fn test_options_from_config_document() {
    let options: ValidationOptions = serde_json::from_str(r#"{"allowExcessKeys": true}"#).unwrap();
    assert!(options.allow_excess_keys);
    assert!(options.throw_on_non_object);

    assert!(serde_json::from_str::<ValidationOptions>(r#"{"bogus": true}"#).is_err());
}

#[test]
fn test_all_of_surfaces_first_failure() {
    let schema: SchemaNode = ObjectSchema::new()
        .field(
            "n",
            all_of([SchemaNode::from(is_integer()), combinators::gt(10.0).into()]),
        )
        .into();

    let err = validate(&json!({"n": 5}), &schema, None, None).unwrap().unwrap();
    assert_eq!(err.message, "Expected number to be greater than 10.");
    assert_eq!(err.keychain.as_deref(), Some("n"));
}

#[test]
fn test_any_of_reports_generic_failure() {
    let schema: SchemaNode = ObjectSchema::new()
        .field(
            "n",
            any_of([SchemaNode::tag("string").unwrap(), is_integer().into()]),
        )
        .into();

    assert_eq!(validate(&json!({"n": "x"}), &schema, None, None).unwrap(), None);
    let err = validate(&json!({"n": 1.5}), &schema, None, None).unwrap().unwrap();
    assert_eq!(err.message, combinators::NO_ALTERNATIVE);
}

#[test]
fn test_validation_error_serializes() {
    let value = json!({"name": "bob", "age": "x", "isAdmin": false});
    let err = validate(&value, &user_schema(), None, None).unwrap().unwrap();
    let encoded = serde_json::to_value(&err).unwrap();
    assert_eq!(encoded["keychain"], json!("age"));
    assert_eq!(encoded["value"], json!("x"));
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,4}", arb_leaf(), 0..6)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(value in arb_object()) {
        let schema = SchemaNode::from_json(&json!({"a": "?string", "b": "*number"})).unwrap();
        let first = validate(&value, &schema, None, None).unwrap();
        let second = validate(&value, &schema, None, None).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_excess_keys_named_exactly(value in arb_object()) {
        let schema = SchemaNode::from_json(&json!({})).unwrap();
        let outcome = validate(&value, &schema, None, None).unwrap();
        let keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();

        if keys.is_empty() {
            prop_assert!(outcome.is_none());
        } else {
            let err = outcome.unwrap();
            prop_assert_eq!(
                err.message,
                format!("These keys were not expected inside this object: {}.", keys.join(", "))
            );
        }
    }

    #[test]
    fn prop_all_of_is_logical_and(n in -50i64..50) {
        let p = all_of([SchemaNode::from(combinators::gt(0.0)), combinators::lt(10.0).into()]);
        let expected = n > 0 && n < 10;
        let schema: SchemaNode = ObjectSchema::new().field("n", p).into();
        let valid = validate(&json!({"n": n}), &schema, None, None).unwrap().is_none();
        prop_assert_eq!(valid, expected);
    }

    #[test]
    fn prop_any_of_is_logical_or(n in -50i64..50) {
        let p = any_of([SchemaNode::from(combinators::lt(0.0)), combinators::gt(10.0).into()]);
        let expected = n < 0 || n > 10;
        let schema: SchemaNode = ObjectSchema::new().field("n", p).into();
        let valid = validate(&json!({"n": n}), &schema, None, None).unwrap().is_none();
        prop_assert_eq!(valid, expected);
    }
}
