//! Schema and error-template trees
//!
//! A [`SchemaNode`] is a closed tagged union decided once, when the schema
//! is authored. The walker matches on it exhaustively and never has to
//! sniff shapes at validation time.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{AuthoringError, Result};
use crate::keychain::KeyChain;
use crate::predicate::Predicate;
use crate::type_tag::TypeTag;

/// One node of a schema tree
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Built-in type descriptor
    Tag(TypeTag),
    /// Decision closure
    Predicate(Predicate),
    /// Every element of an array matches the wrapped node
    ArrayOf(Box<SchemaNode>),
    /// Nested object with ordered declared keys
    Object(ObjectSchema),
}

impl SchemaNode {
    /// Parse a type descriptor such as `"?string"`
    pub fn tag(descriptor: &str) -> Result<Self> {
        TypeTag::parse(descriptor).map(SchemaNode::Tag)
    }

    /// Wrap a node describing every element of an array
    pub fn array_of(element: impl Into<SchemaNode>) -> Self {
        SchemaNode::ArrayOf(Box::new(element.into()))
    }

    /// Build a schema from a JSON document
    ///
    /// Strings become type tags, one-element arrays become [`SchemaNode::ArrayOf`]
    /// and objects become [`ObjectSchema`]s. Predicates cannot be expressed
    /// in JSON; attach them afterwards with [`ObjectSchema::field`].
    pub fn from_json(schema: &Value) -> Result<Self> {
        Self::from_json_at(schema, &mut KeyChain::new())
    }

    fn from_json_at(schema: &Value, keychain: &mut KeyChain) -> Result<Self> {
        match schema {
            Value::String(descriptor) => Self::tag(descriptor),
            Value::Array(elements) => match elements.as_slice() {
                [element] => {
                    let node = keychain.with_segment("0", |kc| Self::from_json_at(element, kc))?;
                    Ok(Self::array_of(node))
                }
                _ => Err(AuthoringError::ArraySchemaArity {
                    keychain: keychain.to_string(),
                }),
            },
            Value::Object(map) => {
                let mut object = ObjectSchema::new();
                for (key, child) in map {
                    let node = keychain.with_segment(key, |kc| Self::from_json_at(child, kc))?;
                    object.insert(key.clone(), node);
                }
                Ok(SchemaNode::Object(object))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Err(AuthoringError::UnusableSchema {
                keychain: keychain.to_string(),
                value: schema.to_string(),
            }),
        }
    }
}

impl From<TypeTag> for SchemaNode {
    fn from(tag: TypeTag) -> Self {
        SchemaNode::Tag(tag)
    }
}

impl From<Predicate> for SchemaNode {
    fn from(predicate: Predicate) -> Self {
        SchemaNode::Predicate(predicate)
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(object: ObjectSchema) -> Self {
        SchemaNode::Object(object)
    }
}

/// Ordered mapping from declared key to schema node
///
/// Keys are unique; declaration order is the order in which keys are
/// evaluated and is what makes short-circuiting deterministic.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, SchemaNode>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key, replacing any earlier node for the same key in place
    pub fn field(mut self, key: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Declare a key on an existing schema
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<SchemaNode>) {
        self.fields.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Declared keys and nodes, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Caller-supplied message overrides, shaped like the schema
///
/// Array schemas are transparent: the template found at an array key
/// applies to every element.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTemplate {
    /// Override for the node at this location
    Message(String),
    /// Overrides for the keys of an object node
    Fields(IndexMap<String, ErrorTemplate>),
}

impl ErrorTemplate {
    /// An empty set of field overrides
    pub fn fields() -> Self {
        ErrorTemplate::Fields(IndexMap::new())
    }

    /// Add an override for `key`
    pub fn field(self, key: impl Into<String>, template: impl Into<ErrorTemplate>) -> Self {
        let mut fields = match self {
            ErrorTemplate::Fields(fields) => fields,
            ErrorTemplate::Message(_) => IndexMap::new(),
        };
        fields.insert(key.into(), template.into());
        ErrorTemplate::Fields(fields)
    }

    /// The template for a child key, if any
    pub fn get(&self, key: &str) -> Option<&ErrorTemplate> {
        match self {
            ErrorTemplate::Fields(fields) => fields.get(key),
            ErrorTemplate::Message(_) => None,
        }
    }

    /// Build a template from a JSON document of strings and objects
    ///
    /// `null` means "no override". Any other kind of leaf is rejected.
    pub fn from_json(template: &Value) -> Result<Self> {
        Self::from_json_at(template, &mut KeyChain::new()).map(|t| t.unwrap_or_else(Self::fields))
    }

    fn from_json_at(template: &Value, keychain: &mut KeyChain) -> Result<Option<Self>> {
        match template {
            Value::Null => Ok(None),
            Value::String(message) => Ok(Some(ErrorTemplate::Message(message.clone()))),
            Value::Object(map) => {
                let mut fields = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    if let Some(t) = keychain.with_segment(key, |kc| Self::from_json_at(child, kc))? {
                        fields.insert(key.clone(), t);
                    }
                }
                Ok(Some(ErrorTemplate::Fields(fields)))
            }
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => Err(AuthoringError::InvalidTemplate {
                keychain: keychain.to_string(),
                value: template.to_string(),
            }),
        }
    }
}

impl From<&str> for ErrorTemplate {
    fn from(message: &str) -> Self {
        ErrorTemplate::Message(message.to_string())
    }
}

impl From<String> for ErrorTemplate {
    fn from(message: String) -> Self {
        ErrorTemplate::Message(message)
    }
}
