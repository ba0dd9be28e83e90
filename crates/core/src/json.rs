//! JSON payload and path types
//!
//! This module defines the vocabulary shared by the transform and schema crates:
//! - Payload: a JSON object as produced by form state
//! - JsonPath: a dotted accessor into an entity (e.g. "organizationNode.name" or "tags[0].label")
//! - PathSegment: an individual path component (Key or Index)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{Error, Result};

/// An entity payload: a JSON object keyed by field name.
pub type Payload = serde_json::Map<String, Value>;

/// Name of the JSON type of a value, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unwrap a JSON value into a payload.
///
/// Fails with [`Error::NotAnObject`] when the root is not a JSON object.
pub fn payload_from_value(value: Value) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::NotAnObject {
            found: value_kind(&other),
        }),
    }
}

/// Parse a payload from JSON text.
pub fn payload_from_str(s: &str) -> Result<Payload> {
    payload_from_value(serde_json::from_str(s)?)
}

/// Is this value a non-null JSON object?
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

// =============================================================================
// JsonPath and PathSegment
// =============================================================================

/// Error type for accessor path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty key in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
}

/// A segment in an accessor path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key: `.foo`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, ".{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// An accessor path into an entity
///
/// Table columns name the value they display with a path such as
/// `organizationNode.name` or `tags[0].label`. Paths serialize as their
/// string form so they can be written directly in schema files.
///
/// # Examples
///
/// ```
/// use nestwrite_core::JsonPath;
/// use serde_json::json;
///
/// let path: JsonPath = "organizationNode.name".parse().unwrap();
/// let entity = json!({"organizationNode": {"name": "Finance"}});
/// assert_eq!(path.resolve(&entity), Some(&json!("Finance")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, resolving to the value itself
    pub fn root() -> Self {
        JsonPath {
            segments: Vec::new(),
        }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Walk the path through `value`.
    ///
    /// Returns `None` as soon as a key is missing, an index is out of range,
    /// or a segment meets a value of the wrong kind.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                PathSegment::Key(k) => current.as_object()?.get(k),
                PathSegment::Index(i) => current.as_array()?.get(*i),
            })
    }

    /// Render the path in its parseable form
    pub fn to_path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Key(k) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(k);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '$'
}

impl FromStr for JsonPath {
    type Err = PathParseError;

    /// Parse a path from a string
    ///
    /// Supported syntax:
    /// - `foo` or `.foo` - object key
    /// - `[0]` - array index
    /// - `foo.bar` - nested keys
    /// - `foo[0].bar` - mixed
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;

        if chars.first() == Some(&'.') {
            i += 1;
        }

        while i < chars.len() {
            if chars[i] == '.' {
                i += 1;
                if i >= chars.len() || chars[i] == '.' {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' {
                let open = i;
                let digits_start = i + 1;
                let close = chars[digits_start..]
                    .iter()
                    .position(|c| *c == ']')
                    .map(|offset| digits_start + offset)
                    .ok_or(PathParseError::UnclosedBracket(open))?;
                let digits: String = chars[digits_start..close].iter().collect();
                let idx = digits
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex(digits_start, digits))?;
                segments.push(PathSegment::Index(idx));
                i = close + 1;
            } else if is_key_char(chars[i]) {
                let start = i;
                while i < chars.len() && is_key_char(chars[i]) {
                    i += 1;
                }
                segments.push(PathSegment::Key(chars[start..i].iter().collect()));
            } else {
                return Err(PathParseError::UnexpectedChar(chars[i], i));
            }
        }

        Ok(JsonPath { segments })
    }
}

impl TryFrom<String> for JsonPath {
    type Error = PathParseError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<JsonPath> for String {
    fn from(path: JsonPath) -> Self {
        path.to_path_string()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}
