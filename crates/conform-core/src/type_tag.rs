//! Built-in textual type descriptors
//!
//! A type tag is a category name optionally prefixed by `*` (the value may
//! be absent) and/or `?` (the value may be null). `*?string` accepts a
//! string, null or nothing at all. Tags are parsed when the schema is
//! authored, so a malformed tag never reaches the walker.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::AuthoringError;
use crate::value::ValueKind;

const OPTIONAL_MARKER: char = '*';
const NULLABLE_MARKER: char = '?';
const MISORDERED_MARKERS: &str = "?*";

/// Runtime categories a type tag can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Null,
    Object,
    String,
    Number,
    Bigint,
    Boolean,
    Symbol,
    Function,
    Undefined,
}

impl TypeCategory {
    /// Whether a value of `kind` belongs to this category
    ///
    /// `object` means any non-null structural value, arrays included.
    /// No JSON value is a `bigint`, `symbol` or `function`.
    pub fn admits(self, kind: ValueKind) -> bool {
        match self {
            TypeCategory::Null => kind == ValueKind::Null,
            TypeCategory::Object => kind.is_structural(),
            TypeCategory::String => kind == ValueKind::String,
            TypeCategory::Number => kind == ValueKind::Number,
            TypeCategory::Boolean => kind == ValueKind::Boolean,
            TypeCategory::Undefined => kind == ValueKind::Absent,
            TypeCategory::Bigint | TypeCategory::Symbol | TypeCategory::Function => false,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TypeCategory::Null => "null",
            TypeCategory::Object => "object",
            TypeCategory::String => "string",
            TypeCategory::Number => "number",
            TypeCategory::Bigint => "bigint",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Symbol => "symbol",
            TypeCategory::Function => "function",
            TypeCategory::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeCategory {
    type Err = AuthoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(TypeCategory::Null),
            "object" => Ok(TypeCategory::Object),
            "string" => Ok(TypeCategory::String),
            "number" => Ok(TypeCategory::Number),
            "bigint" => Ok(TypeCategory::Bigint),
            "boolean" => Ok(TypeCategory::Boolean),
            "symbol" => Ok(TypeCategory::Symbol),
            "function" => Ok(TypeCategory::Function),
            "undefined" => Ok(TypeCategory::Undefined),
            _ => Err(AuthoringError::InvalidTypeTag(s.to_string())),
        }
    }
}

/// A parsed type descriptor with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    category: TypeCategory,
    optional: bool,
    nullable: bool,
}

impl TypeTag {
    /// A plain tag with no modifiers
    pub fn new(category: TypeCategory) -> Self {
        Self {
            category,
            optional: false,
            nullable: false,
        }
    }

    /// Parse a descriptor such as `"string"`, `"?number"` or `"*?object"`
    pub fn parse(descriptor: &str) -> Result<Self, AuthoringError> {
        if descriptor.starts_with(MISORDERED_MARKERS) {
            return Err(AuthoringError::MisorderedModifiers(descriptor.to_string()));
        }

        let (optional, rest) = match descriptor.strip_prefix(OPTIONAL_MARKER) {
            Some(rest) => (true, rest),
            None => (false, descriptor),
        };
        let (nullable, rest) = match rest.strip_prefix(NULLABLE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, rest),
        };

        let category = rest
            .parse::<TypeCategory>()
            .map_err(|_| AuthoringError::InvalidTypeTag(descriptor.to_string()))?;

        Ok(Self {
            category,
            optional,
            nullable,
        })
    }

    /// Mark the tag optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the tag nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Check a possibly-absent value against this tag
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let kind = ValueKind::of(value);
        if self.optional && kind == ValueKind::Absent {
            return true;
        }
        if self.nullable && kind == ValueKind::Null {
            return true;
        }
        self.category.admits(kind)
    }

    /// The built-in message used when no override applies
    pub fn default_message(&self) -> String {
        match (self.optional, self.nullable) {
            (true, true) => format!("Expected typeof {}, null or no value.", self.category),
            (true, false) => format!("Expected typeof {} or no value.", self.category),
            (false, true) => format!("Expected typeof {} or null.", self.category),
            (false, false) => format!("Expected typeof {}.", self.category),
        }
    }
}

impl FromStr for TypeTag {
    type Err = AuthoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::parse(s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{}", OPTIONAL_MARKER)?;
        }
        if self.nullable {
            write!(f, "{}", NULLABLE_MARKER)?;
        }
        write!(f, "{}", self.category)
    }
}
