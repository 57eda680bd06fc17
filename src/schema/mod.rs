//! Compiled schema model
//!
//! A schema document is compiled once into a [`Schema`], an immutable tree of
//! [`Node`]s. Each node carries at most one facet category ([`Shape`]), so a
//! node can never mix object rules with string rules.

pub mod compile;
pub mod error;

pub use compile::{CompileOptions, compile, compile_with};
pub use error::{SchemaError, SchemaErrorKind};

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// JSON value kinds understood by the `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonType {
    /// Name as it appears in a schema document
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Most specific type of a runtime value
    ///
    /// Numbers without a fractional part report as `integer`.
    #[must_use]
    #[inline]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if is_integral(n) => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` is an instance of this type
    #[must_use]
    #[inline]
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Number, Value::Number(_)) => true,
            (Self::Integer, Value::Number(n)) => is_integral(n),
            (expected, actual) => expected == Self::of(actual),
        }
    }
}

impl fmt::Display for JsonType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_integral(number: &serde_json::Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }
    number.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// Named string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RFC 3339 `date-time`
    DateTime,
}

impl Format {
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateTime => "date-time",
        }
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled, immutable schema
///
/// Cheap to share: validation only reads from it, so one instance can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Node,
}

impl Schema {
    pub(crate) const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Root constraint node
    #[must_use]
    #[inline]
    pub const fn root(&self) -> &Node {
        &self.root
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    /// Parse JSON text and compile it in strict mode
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let document: Value = serde_json::from_str(s).map_err(|e| {
            SchemaError::new("", SchemaErrorKind::Syntax {
                message: e.to_string(),
            })
        })?;
        compile(&document)
    }
}

/// One constraint node
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) declared_type: Option<JsonType>,
    pub(crate) constant: Option<Value>,
    pub(crate) allowed: Option<Vec<Value>>,
    pub(crate) shape: Shape,
}

impl Node {
    #[must_use]
    #[inline]
    pub const fn declared_type(&self) -> Option<JsonType> {
        self.declared_type
    }

    #[must_use]
    #[inline]
    pub const fn constant(&self) -> Option<&Value> {
        self.constant.as_ref()
    }

    #[must_use]
    #[inline]
    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }

    #[must_use]
    #[inline]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Facet category of a node
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Shape {
    /// No facets; only `type`, `const` and `enum` apply
    Any,
    Object(ObjectRules),
    Array(ArrayRules),
    String(StringRules),
}

/// Rules applied to object candidates
#[derive(Debug, Clone)]
pub struct ObjectRules {
    pub required: Vec<String>,
    /// Declaration order is kept; children are visited in this order
    pub properties: Vec<(String, Node)>,
    pub additional_properties: bool,
}

impl ObjectRules {
    /// Child node declared for `key`
    #[must_use]
    #[inline]
    pub fn property(&self, key: &str) -> Option<&Node> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }
}

/// Rules applied to array candidates
#[derive(Debug, Clone, Default)]
pub struct ArrayRules {
    pub min_items: Option<u64>,
    pub items: Option<Box<Node>>,
}

/// Rules applied to string candidates
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    pub min_length: Option<u64>,
    pub format: Option<Format>,
}
