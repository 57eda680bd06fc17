//! Errors raised while compiling a schema document

use thiserror::Error;

/// A malformed or self-contradictory schema document
///
/// `pointer` is a JSON Pointer into the schema document identifying the
/// offending node or keyword (empty for the document root).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at '{}')", display_pointer(.pointer))]
pub struct SchemaError {
    pub pointer: String,
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    #[inline]
    pub fn new<S: Into<String>>(pointer: S, kind: SchemaErrorKind) -> Self {
        Self {
            pointer: pointer.into(),
            kind,
        }
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "#" } else { pointer }
}

/// What is wrong with the schema document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    /// Schema text is not valid JSON or YAML
    #[error("schema is not a valid document: {message}")]
    Syntax { message: String },

    #[error("schema node must be an object, got {actual}")]
    NotAnObject { actual: String },

    #[error("unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String },

    /// Keyword value has the wrong JSON shape
    #[error("invalid value for '{keyword}': expected {expected}")]
    InvalidKeyword {
        keyword: String,
        expected: &'static str,
    },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    #[error("unsupported format '{name}'")]
    UnsupportedFormat { name: String },

    /// Facet keyword used on a node of another type
    #[error("keyword '{keyword}' does not apply to type '{declared}'")]
    KeywordTypeMismatch { keyword: String, declared: String },

    /// Facets from different categories on an untyped node
    #[error("keywords '{first}' and '{second}' apply to different types")]
    MixedFacets { first: String, second: String },

    #[error("'enum' must list at least one value")]
    EmptyEnum,

    #[error("duplicate entry {value} in '{keyword}'")]
    DuplicateEntry { keyword: String, value: String },

    #[error("'required' is declared without 'properties'")]
    RequiredWithoutProperties,

    /// A required key can never be present
    #[error("required key '{key}' is not declared in 'properties' and additional properties are disallowed")]
    UnsatisfiableRequired { key: String },

    #[error("'const' value {value} is not listed in 'enum'")]
    ConstNotInEnum { value: String },

    /// `const` or `enum` value contradicts `type`
    #[error("value {value} in '{keyword}' is not of type '{declared}'")]
    ValueTypeMismatch {
        keyword: String,
        value: String,
        declared: String,
    },
}
