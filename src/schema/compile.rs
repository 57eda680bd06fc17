//! Schema document compiler
//!
//! Walks a schema document once and produces a [`Schema`]. Compilation is a
//! pure function of the document and the [`CompileOptions`].

use super::error::{SchemaError, SchemaErrorKind};
use super::{ArrayRules, Format, JsonType, Node, ObjectRules, Schema, Shape, StringRules};
use crate::validate::json_equal;
use serde_json::{Map, Value};

/// Keywords with no effect on validation
const ANNOTATIONS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
];

/// Keywords that apply to every node
const GENERIC: &[&str] = &["type", "const", "enum"];

/// Options controlling how strictly a document is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Reject unknown keywords and contradictory keyword combinations
    pub strict: bool,
}

impl CompileOptions {
    #[must_use]
    #[inline]
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    /// Skip unknown keywords, unsupported formats and facets that do not
    /// match the declared type
    #[must_use]
    #[inline]
    pub const fn lenient() -> Self {
        Self { strict: false }
    }
}

impl Default for CompileOptions {
    #[inline]
    fn default() -> Self {
        Self::strict()
    }
}

/// Compile a schema document in strict mode
///
/// # Errors
///
/// Returns an error if the document is malformed or self-contradictory.
#[inline]
pub fn compile(document: &Value) -> Result<Schema, SchemaError> {
    compile_with(document, CompileOptions::default())
}

/// Compile a schema document with explicit options
///
/// # Errors
///
/// Returns an error if:
/// - A node is not an object, or a keyword value has the wrong shape
/// - `type` names an unknown type, or `enum` is empty
/// - Facets from different categories appear on an untyped node
/// - In strict mode, any of the checks described on [`CompileOptions::strict`]
///   fails
#[inline]
pub fn compile_with(document: &Value, options: CompileOptions) -> Result<Schema, SchemaError> {
    let compiler = Compiler { options };
    compiler.node(document, "").map(Schema::new)
}

/// Facet category a keyword belongs to
fn facet_type(keyword: &str) -> Option<JsonType> {
    match keyword {
        "required" | "properties" | "additionalProperties" => Some(JsonType::Object),
        "minItems" | "items" => Some(JsonType::Array),
        "minLength" | "format" => Some(JsonType::String),
        _ => None,
    }
}

/// Append one reference token to a JSON Pointer
fn child_pointer(parent: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{parent}/{escaped}")
}

fn invalid(pointer: &str, keyword: &str, expected: &'static str) -> SchemaError {
    SchemaError::new(
        child_pointer(pointer, keyword),
        SchemaErrorKind::InvalidKeyword {
            keyword: keyword.to_owned(),
            expected,
        },
    )
}

struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    fn node(&self, value: &Value, pointer: &str) -> Result<Node, SchemaError> {
        let Value::Object(map) = value else {
            return Err(SchemaError::new(pointer, SchemaErrorKind::NotAnObject {
                actual: JsonType::of(value).to_string(),
            }));
        };

        let declared_type = map
            .get("type")
            .map(|value| parse_type(value, pointer))
            .transpose()?;

        if self.options.strict {
            for keyword in map.keys() {
                let known = ANNOTATIONS.contains(&keyword.as_str())
                    || GENERIC.contains(&keyword.as_str())
                    || facet_type(keyword).is_some();
                if !known {
                    return Err(SchemaError::new(
                        child_pointer(pointer, keyword),
                        SchemaErrorKind::UnknownKeyword {
                            keyword: keyword.clone(),
                        },
                    ));
                }
            }
        }

        let constant = map.get("const").cloned();
        let allowed = self.enum_values(map, pointer)?;
        if self.options.strict {
            check_values(declared_type, constant.as_ref(), allowed.as_deref(), pointer)?;
        }

        let shape = match self.facet_category(map, declared_type, pointer)? {
            Some(JsonType::Object) => Shape::Object(self.object_rules(map, pointer)?),
            Some(JsonType::Array) => Shape::Array(self.array_rules(map, pointer)?),
            Some(JsonType::String) => Shape::String(self.string_rules(map, pointer)?),
            _ => Shape::Any,
        };

        Ok(Node {
            declared_type,
            constant,
            allowed,
            shape,
        })
    }

    /// Decide which facet category the node carries
    fn facet_category(
        &self,
        map: &Map<String, Value>,
        declared_type: Option<JsonType>,
        pointer: &str,
    ) -> Result<Option<JsonType>, SchemaError> {
        if let Some(declared) = declared_type {
            if self.options.strict {
                let stray = map
                    .keys()
                    .find(|keyword| facet_type(keyword).is_some_and(|kind| kind != declared));
                if let Some(keyword) = stray {
                    return Err(SchemaError::new(
                        child_pointer(pointer, keyword),
                        SchemaErrorKind::KeywordTypeMismatch {
                            keyword: keyword.clone(),
                            declared: declared.to_string(),
                        },
                    ));
                }
            }
            return Ok(match declared {
                JsonType::Object | JsonType::Array | JsonType::String => Some(declared),
                JsonType::Number | JsonType::Integer | JsonType::Boolean | JsonType::Null => None,
            });
        }

        let mut first: Option<(&String, JsonType)> = None;
        for keyword in map.keys() {
            let Some(kind) = facet_type(keyword) else {
                continue;
            };
            match first {
                None => first = Some((keyword, kind)),
                Some((first_keyword, first_kind)) if first_kind != kind => {
                    return Err(SchemaError::new(
                        child_pointer(pointer, keyword),
                        SchemaErrorKind::MixedFacets {
                            first: first_keyword.clone(),
                            second: keyword.clone(),
                        },
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(first.map(|(_, kind)| kind))
    }

    fn enum_values(
        &self,
        map: &Map<String, Value>,
        pointer: &str,
    ) -> Result<Option<Vec<Value>>, SchemaError> {
        let values = match map.get("enum") {
            None => return Ok(None),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(invalid(pointer, "enum", "an array")),
        };

        if values.is_empty() {
            return Err(SchemaError::new(
                child_pointer(pointer, "enum"),
                SchemaErrorKind::EmptyEnum,
            ));
        }

        if self.options.strict {
            for (index, value) in values.iter().enumerate() {
                if values[..index].iter().any(|seen| json_equal(seen, value)) {
                    return Err(SchemaError::new(
                        child_pointer(&child_pointer(pointer, "enum"), &index.to_string()),
                        SchemaErrorKind::DuplicateEntry {
                            keyword: "enum".to_owned(),
                            value: value.to_string(),
                        },
                    ));
                }
            }
        }

        Ok(Some(values.clone()))
    }

    fn object_rules(
        &self,
        map: &Map<String, Value>,
        pointer: &str,
    ) -> Result<ObjectRules, SchemaError> {
        let properties_pointer = child_pointer(pointer, "properties");
        let properties = match map.get("properties") {
            None => Vec::new(),
            Some(Value::Object(props)) => props
                .iter()
                .map(|(name, child)| {
                    let node = self.node(child, &child_pointer(&properties_pointer, name))?;
                    Ok((name.clone(), node))
                })
                .collect::<Result<Vec<_>, SchemaError>>()?,
            Some(_) => return Err(invalid(pointer, "properties", "an object of schemas")),
        };

        let additional_properties = match map.get("additionalProperties") {
            None => true,
            Some(Value::Bool(allowed)) => *allowed,
            Some(_) => return Err(invalid(pointer, "additionalProperties", "a boolean")),
        };

        let required_pointer = child_pointer(pointer, "required");
        let mut required: Vec<String> = Vec::new();
        match map.get("required") {
            None => {}
            Some(Value::Array(names)) => {
                for name in names {
                    let Value::String(name) = name else {
                        return Err(invalid(pointer, "required", "an array of strings"));
                    };
                    if required.contains(name) {
                        if self.options.strict {
                            return Err(SchemaError::new(
                                required_pointer,
                                SchemaErrorKind::DuplicateEntry {
                                    keyword: "required".to_owned(),
                                    value: format!("'{name}'"),
                                },
                            ));
                        }
                        continue;
                    }
                    required.push(name.clone());
                }
            }
            Some(_) => return Err(invalid(pointer, "required", "an array of strings")),
        }

        let rules = ObjectRules {
            required,
            properties,
            additional_properties,
        };

        if self.options.strict && !rules.required.is_empty() {
            if !map.contains_key("properties") {
                return Err(SchemaError::new(
                    required_pointer,
                    SchemaErrorKind::RequiredWithoutProperties,
                ));
            }
            if !rules.additional_properties {
                let missing = rules
                    .required
                    .iter()
                    .find(|key| rules.property(key).is_none());
                if let Some(key) = missing {
                    return Err(SchemaError::new(
                        required_pointer,
                        SchemaErrorKind::UnsatisfiableRequired { key: key.clone() },
                    ));
                }
            }
        }

        Ok(rules)
    }

    fn array_rules(
        &self,
        map: &Map<String, Value>,
        pointer: &str,
    ) -> Result<ArrayRules, SchemaError> {
        let min_items = non_negative(map, "minItems", pointer)?;
        let items = match map.get("items") {
            None => None,
            Some(schema @ Value::Object(_)) => {
                let node = self.node(schema, &child_pointer(pointer, "items"))?;
                Some(Box::new(node))
            }
            Some(_) => return Err(invalid(pointer, "items", "a single schema object")),
        };
        Ok(ArrayRules { min_items, items })
    }

    fn string_rules(
        &self,
        map: &Map<String, Value>,
        pointer: &str,
    ) -> Result<StringRules, SchemaError> {
        let min_length = non_negative(map, "minLength", pointer)?;
        let format = match map.get("format") {
            None => None,
            Some(Value::String(raw)) => {
                match serde_json::from_value::<Format>(Value::String(raw.clone())) {
                    Ok(format) => Some(format),
                    Err(_) if !self.options.strict => None,
                    Err(_) => {
                        return Err(SchemaError::new(
                            child_pointer(pointer, "format"),
                            SchemaErrorKind::UnsupportedFormat { name: raw.clone() },
                        ));
                    }
                }
            }
            Some(_) => return Err(invalid(pointer, "format", "a string")),
        };
        Ok(StringRules { min_length, format })
    }
}

fn parse_type(value: &Value, pointer: &str) -> Result<JsonType, SchemaError> {
    let Value::String(name) = value else {
        return Err(invalid(pointer, "type", "a single type name"));
    };
    serde_json::from_value::<JsonType>(value.clone()).map_err(|_| {
        SchemaError::new(
            child_pointer(pointer, "type"),
            SchemaErrorKind::UnknownType { name: name.clone() },
        )
    })
}

fn non_negative(
    map: &Map<String, Value>,
    keyword: &str,
    pointer: &str,
) -> Result<Option<u64>, SchemaError> {
    match map.get(keyword) {
        None => Ok(None),
        Some(Value::Number(n)) => whole_count(n)
            .map(Some)
            .ok_or_else(|| invalid(pointer, keyword, "a non-negative integer")),
        Some(_) => Err(invalid(pointer, keyword, "a non-negative integer")),
    }
}

/// Non-negative integer value, accepting whole floats such as `1.0`
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions,
    reason = "range and fraction are checked first"
)]
fn whole_count(number: &serde_json::Number) -> Option<u64> {
    if let Some(count) = number.as_u64() {
        return Some(count);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
        .map(|f| f as u64)
}

/// Strict-mode consistency between `type`, `const` and `enum`
fn check_values(
    declared_type: Option<JsonType>,
    constant: Option<&Value>,
    allowed: Option<&[Value]>,
    pointer: &str,
) -> Result<(), SchemaError> {
    if let Some(declared) = declared_type {
        let mismatch = |keyword: &str, value: &Value, at: String| {
            SchemaError::new(at, SchemaErrorKind::ValueTypeMismatch {
                keyword: keyword.to_owned(),
                value: value.to_string(),
                declared: declared.to_string(),
            })
        };
        if let Some(value) = constant
            && !declared.matches(value)
        {
            return Err(mismatch("const", value, child_pointer(pointer, "const")));
        }
        let enum_pointer = child_pointer(pointer, "enum");
        for (index, value) in allowed.unwrap_or_default().iter().enumerate() {
            if !declared.matches(value) {
                let at = child_pointer(&enum_pointer, &index.to_string());
                return Err(mismatch("enum", value, at));
            }
        }
    }

    if let (Some(value), Some(allowed)) = (constant, allowed)
        && !allowed.iter().any(|candidate| json_equal(candidate, value))
    {
        return Err(SchemaError::new(
            child_pointer(pointer, "const"),
            SchemaErrorKind::ConstNotInEnum {
                value: value.to_string(),
            },
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_pointer_escapes_tokens() {
        assert_eq!(child_pointer("", "properties"), "/properties");
        assert_eq!(child_pointer("/properties", "a/b"), "/properties/a~1b");
        assert_eq!(child_pointer("/properties", "x~y"), "/properties/x~0y");
    }

    #[test]
    fn test_whole_count_accepts_integral_floats() {
        let count = |value: Value| match value {
            Value::Number(n) => whole_count(&n),
            _ => None,
        };
        assert_eq!(count(serde_json::json!(3)), Some(3));
        assert_eq!(count(serde_json::json!(1.0)), Some(1));
        assert_eq!(count(serde_json::json!(1.5)), None);
        assert_eq!(count(serde_json::json!(-1)), None);
        assert_eq!(count(serde_json::json!(-2.0)), None);
    }

    #[test]
    fn test_facet_type_groups_keywords() {
        assert_eq!(facet_type("required"), Some(JsonType::Object));
        assert_eq!(facet_type("items"), Some(JsonType::Array));
        assert_eq!(facet_type("format"), Some(JsonType::String));
        assert_eq!(facet_type("enum"), None);
    }
}
