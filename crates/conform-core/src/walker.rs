//! Recursive schema/value walker
//!
//! The walker descends the schema tree, not the value, so recursion depth is
//! bounded by the schema no matter what shape the value has. Object keys are
//! checked in declaration order and the first failure is returned at once;
//! later siblings are never evaluated.

use serde_json::Value;

use crate::error::{AuthoringError, Result, ValidationError};
use crate::keychain::KeyChain;
use crate::options::ValidationOptions;
use crate::predicate::{Predicate, PredicateContext};
use crate::resolver::{self, LeafFailure, EXPECTED_OBJECT, NON_OBJECT_ROOT, NOT_AN_ARRAY};
use crate::schema::{ErrorTemplate, ObjectSchema, SchemaNode};
use crate::type_tag::TypeTag;
use crate::value::ValueKind;

/// `None` when the value conforms
pub type Outcome = Option<ValidationError>;

/// Validate a root value against a schema node
pub(crate) fn walk(
    value: &Value,
    node: &SchemaNode,
    template: Option<&ErrorTemplate>,
    options: &ValidationOptions,
) -> Result<Outcome> {
    let mut walker = Walker::new(options, KeyChain::new(), options.throw_on_non_object);
    let outcome = walker.check_node(Some(value), None, node, template).map_err(|err| {
        tracing::warn!(error = %err, "Validation aborted");
        err
    })?;

    if let Some(err) = &outcome {
        tracing::debug!(
            keychain = err.keychain.as_deref().unwrap_or(crate::keychain::ROOT_LEVEL),
            message = %err.message,
            "Validation failed"
        );
    }
    Ok(outcome)
}

/// Check a nested node on behalf of a predicate, at the predicate's location
///
/// No caller template applies below a predicate, and a non-object where an
/// object schema is expected is always reported, never raised, so every
/// branch of a combinator gets evaluated.
pub(crate) fn check_nested(
    value: Option<&Value>,
    ctx: &PredicateContext<'_>,
    node: &SchemaNode,
) -> Result<Outcome> {
    let mut walker = Walker::new(ctx.options, ctx.keychain.clone(), false);
    walker.check_node(value, ctx.parent, node, None)
}

struct Walker<'o> {
    options: &'o ValidationOptions,
    keychain: KeyChain,
    /// Raise `NonObjectRoot` for a non-object at the root
    raise_non_object: bool,
}

impl<'o> Walker<'o> {
    fn new(options: &'o ValidationOptions, keychain: KeyChain, raise_non_object: bool) -> Self {
        Self {
            options,
            keychain,
            raise_non_object,
        }
    }

    fn check_node(
        &mut self,
        value: Option<&Value>,
        parent: Option<&Value>,
        node: &SchemaNode,
        template: Option<&ErrorTemplate>,
    ) -> Result<Outcome> {
        match node {
            SchemaNode::Object(schema) => self.check_object(value, schema, template),
            SchemaNode::ArrayOf(element) => self.check_array(value, element, template),
            SchemaNode::Tag(tag) => self.check_tag(value, tag, template),
            SchemaNode::Predicate(predicate) => self.check_predicate(value, parent, predicate, template),
        }
    }

    /// Run `f` one level deeper
    fn descend<R>(&mut self, segment: impl Into<String>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.keychain.push(segment);
        let result = f(self);
        self.keychain.pop();
        result
    }

    fn check_object(
        &mut self,
        value: Option<&Value>,
        schema: &ObjectSchema,
        template: Option<&ErrorTemplate>,
    ) -> Result<Outcome> {
        if !ValueKind::of(value).is_structural() {
            return self.not_an_object(value);
        }

        tracing::trace!(keychain = %self.keychain, keys = schema.len(), "Checking object");

        for (key, child) in schema.iter() {
            let child_value = value.and_then(|container| member(container, key));
            let child_template = template.and_then(|t| t.get(key));

            let outcome = self.descend(key, |w| w.check_node(child_value, value, child, child_template))?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }

        if self.options.allow_excess_keys {
            return Ok(None);
        }

        let excess: Vec<String> = value
            .map(own_keys)
            .unwrap_or_default()
            .into_iter()
            .filter(|key| !schema.contains_key(key))
            .collect();

        if excess.is_empty() {
            Ok(None)
        } else {
            Ok(Some(resolver::excess_keys(&excess, value, &self.keychain)))
        }
    }

    fn not_an_object(&self, value: Option<&Value>) -> Result<Outcome> {
        if !self.keychain.is_empty() {
            return Ok(Some(resolver::structural(EXPECTED_OBJECT, value, &self.keychain)));
        }

        if self.raise_non_object {
            return Err(AuthoringError::non_object_root(value));
        }

        Ok(Some(resolver::structural(NON_OBJECT_ROOT, value, &self.keychain)))
    }

    fn check_array(
        &mut self,
        value: Option<&Value>,
        element: &SchemaNode,
        template: Option<&ErrorTemplate>,
    ) -> Result<Outcome> {
        let Some(Value::Array(items)) = value else {
            return Ok(Some(resolver::structural(NOT_AN_ARRAY, value, &self.keychain)));
        };

        for (index, item) in items.iter().enumerate() {
            let outcome = self.descend(index.to_string(), |w| w.check_node(Some(item), value, element, template))?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }

        Ok(None)
    }

    fn check_tag(&self, value: Option<&Value>, tag: &TypeTag, template: Option<&ErrorTemplate>) -> Result<Outcome> {
        if tag.matches(value) {
            return Ok(None);
        }
        resolver::resolve(value, LeafFailure::Tag(tag), template, &self.keychain).map(Some)
    }

    fn check_predicate(
        &self,
        value: Option<&Value>,
        parent: Option<&Value>,
        predicate: &Predicate,
        template: Option<&ErrorTemplate>,
    ) -> Result<Outcome> {
        let ctx = PredicateContext {
            parent,
            options: self.options,
            keychain: &self.keychain,
        };

        let verdict = predicate.evaluate(value, &ctx)?;
        if verdict.is_valid() {
            return Ok(None);
        }

        let failure = LeafFailure::Predicate { predicate, verdict };
        resolver::resolve(value, failure, template, &self.keychain).map(Some)
    }
}

/// Look up a declared key in a structural value
///
/// Arrays are addressed by decimal index keys.
fn member<'v>(container: &'v Value, key: &str) -> Option<&'v Value> {
    match container {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Own keys of a structural value, in its enumeration order
fn own_keys(container: &Value) -> Vec<String> {
    match container {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}
