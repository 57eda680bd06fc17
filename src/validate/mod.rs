//! Validation of candidate values against a compiled [`Schema`]
//!
//! The walk is depth-first and stops at the first violation. Within a node
//! the checks run in a fixed order: type, const, enum, then the facets of the
//! node's category (required, properties, additionalProperties for objects;
//! minItems, items for arrays; minLength, format for strings). The order is
//! what makes messages reproducible, so it must not change.

pub mod format;
pub mod path;

pub use path::{InstancePath, PathSegment};

use crate::schema::{ArrayRules, Format, JsonType, Node, ObjectRules, Schema, Shape, StringRules};
use path::Segment;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use thiserror::Error;

/// The first constraint a candidate violated
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{path}: {violation}")]
pub struct ValidationError {
    pub path: InstancePath,
    pub violation: Violation,
}

/// The unmet constraint
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Violation {
    #[error("expected type {expected}, got {actual}")]
    Type { expected: JsonType, actual: JsonType },

    #[error("must be equal to constant {expected}")]
    Const { expected: Value },

    #[error("must be one of {}", list(.allowed))]
    Enum { allowed: Vec<Value> },

    #[error("missing required key '{key}'")]
    MissingRequired { key: String },

    #[error("unknown key '{key}' is not allowed")]
    AdditionalProperty { key: String },

    #[error("expected at least {min} item(s), got {actual} (minItems)")]
    MinItems { min: u64, actual: u64 },

    #[error("expected at least {min} character(s), got {actual} (minLength)")]
    MinLength { min: u64, actual: u64 },

    #[error("{} is not a valid {format}", quoted(.value))]
    Format { format: Format, value: String },
}

fn quoted(text: &str) -> String {
    Value::String(text.to_owned()).to_string()
}

fn list(values: &[Value]) -> String {
    let mut out = String::from("[");
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{value}");
    }
    out.push(']');
    out
}

impl Schema {
    /// Check `value` against this schema
    ///
    /// # Errors
    ///
    /// Returns the first violation found in traversal order.
    #[inline]
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        validate(self, value)
    }

    #[must_use]
    #[inline]
    pub fn is_valid(&self, value: &Value) -> bool {
        validate(self, value).is_ok()
    }
}

/// Check `value` against `schema`
///
/// # Errors
///
/// Returns the first violation found in traversal order.
#[inline]
pub fn validate(schema: &Schema, value: &Value) -> Result<(), ValidationError> {
    let mut path = Vec::new();
    check(schema.root(), value, &mut path)
}

/// JSON equality: numbers compare by value, so `1` equals `1.0`
#[must_use]
#[inline]
pub fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a == b;
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return a == b;
            }
            a.as_f64() == b.as_f64()
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
        }
        (a, b) => a == b,
    }
}

fn fail(path: &[Segment<'_>], violation: Violation) -> Result<(), ValidationError> {
    Err(ValidationError {
        path: InstancePath::from_segments(path),
        violation,
    })
}

fn check<'a>(
    node: &'a Node,
    value: &'a Value,
    path: &mut Vec<Segment<'a>>,
) -> Result<(), ValidationError> {
    if let Some(expected) = node.declared_type
        && !expected.matches(value)
    {
        return fail(path, Violation::Type {
            expected,
            actual: JsonType::of(value),
        });
    }

    if let Some(expected) = node.constant.as_ref()
        && !json_equal(expected, value)
    {
        return fail(path, Violation::Const {
            expected: expected.clone(),
        });
    }

    if let Some(allowed) = node.allowed.as_ref()
        && !allowed.iter().any(|candidate| json_equal(candidate, value))
    {
        return fail(path, Violation::Enum {
            allowed: allowed.clone(),
        });
    }

    // Untyped nodes only apply their facets to matching candidates
    match (&node.shape, value) {
        (Shape::Object(rules), Value::Object(object)) => check_object(rules, object, path),
        (Shape::Array(rules), Value::Array(items)) => check_array(rules, items, path),
        (Shape::String(rules), Value::String(text)) => check_string(rules, text, path),
        _ => Ok(()),
    }
}

fn check_object<'a>(
    rules: &'a ObjectRules,
    object: &'a Map<String, Value>,
    path: &mut Vec<Segment<'a>>,
) -> Result<(), ValidationError> {
    if let Some(key) = rules.required.iter().find(|key| !object.contains_key(*key)) {
        return fail(path, Violation::MissingRequired { key: key.clone() });
    }

    for (key, child) in &rules.properties {
        if let Some(member) = object.get(key) {
            path.push(Segment::Key(key));
            check(child, member, path)?;
            path.pop();
        }
    }

    if !rules.additional_properties
        && let Some(key) = object.keys().find(|key| rules.property(key).is_none())
    {
        return fail(path, Violation::AdditionalProperty { key: key.clone() });
    }

    Ok(())
}

fn check_array<'a>(
    rules: &'a ArrayRules,
    items: &'a [Value],
    path: &mut Vec<Segment<'a>>,
) -> Result<(), ValidationError> {
    let actual = items.len() as u64;
    if let Some(min) = rules.min_items
        && actual < min
    {
        return fail(path, Violation::MinItems { min, actual });
    }

    if let Some(child) = rules.items.as_deref() {
        for (index, item) in items.iter().enumerate() {
            path.push(Segment::Index(index));
            check(child, item, path)?;
            path.pop();
        }
    }

    Ok(())
}

fn check_string(
    rules: &StringRules,
    text: &str,
    path: &[Segment<'_>],
) -> Result<(), ValidationError> {
    if let Some(min) = rules.min_length {
        let actual = text.chars().count() as u64;
        if actual < min {
            return fail(path, Violation::MinLength { min, actual });
        }
    }

    if let Some(format) = rules.format
        && !format::conforms(format, text)
    {
        return fail(path, Violation::Format {
            format,
            value: text.to_owned(),
        });
    }

    Ok(())
}
