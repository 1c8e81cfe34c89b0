//! # Parameter Types
//!
//! Route templates declare a type tag for every parameter (`{id:int}`). A tag
//! resolves to a [`ParamType`], which pairs the tag with a converter that turns
//! a raw path segment into a [`ParamValue`].
//!
//! ## Built-in tags
//!
//! | Tag   | Value                | Converter                       |
//! |-------|----------------------|---------------------------------|
//! | `int` | [`ParamValue::Int`]  | base-10 signed 32-bit integer   |
//!
//! A parameter without a tag (`{name}`) gets the `string` type, which binds
//! the segment as-is. `string` is not itself a tag: `{name:string}` is an
//! undefined type unless a registry adds it.
//!
//! ## Adding a tag
//!
//! ```rust
//! use ctrlroute::params::{ParamTypeRegistry, ParamValue};
//! use ctrlroute::template::TemplateParser;
//!
//! fn parse_uint(segment: &str) -> Option<ParamValue> {
//!     segment.parse::<i32>().ok().filter(|v| *v >= 0).map(ParamValue::Int)
//! }
//!
//! let mut registry = ParamTypeRegistry::default();
//! registry.register("uint", parse_uint);
//!
//! let parser = TemplateParser::with_registry(registry);
//! let pattern = parser.parse("pages/{n:uint}").unwrap();
//! assert!(pattern.match_path("pages/3").is_some());
//! assert!(pattern.match_path("pages/-3").is_none());
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Tag reported by the implicit type of untagged parameters.
pub const STRING_TAG: &str = "string";

/// Tag for base-10 signed 32-bit integers.
pub const INT_TAG: &str = "int";

/// Converts a raw, non-empty path segment into a typed value.
///
/// Returning `None` means the segment does not fit the type, which the matcher
/// treats as a plain no-match.
pub type Converter = fn(&str) -> Option<ParamValue>;

/// A typed value bound to a parameter name after a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Int(i32),
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::String(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{s}"),
            ParamValue::Int(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v)
    }
}

/// A resolved parameter type: its tag plus the converter for request segments.
///
/// Two types are equal when their tags are equal.
#[derive(Clone)]
pub struct ParamType {
    tag: Arc<str>,
    converter: Converter,
}

impl ParamType {
    pub fn new(tag: impl Into<Arc<str>>, converter: Converter) -> Self {
        Self {
            tag: tag.into(),
            converter,
        }
    }

    /// The implicit type of untagged parameters.
    #[must_use]
    pub fn string() -> Self {
        Self::new(STRING_TAG, convert_string)
    }

    /// The built-in `int` type.
    #[must_use]
    pub fn int() -> Self {
        Self::new(INT_TAG, convert_int)
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        self.tag.as_ref() == STRING_TAG
    }

    /// Convert a request segment, `None` on type mismatch.
    #[inline]
    #[must_use]
    pub fn convert(&self, segment: &str) -> Option<ParamValue> {
        (self.converter)(segment)
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for ParamType {}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamType").field(&self.tag).finish()
    }
}

fn convert_string(segment: &str) -> Option<ParamValue> {
    Some(ParamValue::String(segment.to_string()))
}

fn convert_int(segment: &str) -> Option<ParamValue> {
    segment.parse::<i32>().ok().map(ParamValue::Int)
}

/// Mapping from type tag to [`ParamType`].
///
/// `Default` yields the built-in `int` tag. Untagged parameters never go
/// through the registry.
#[derive(Debug, Clone)]
pub struct ParamTypeRegistry {
    types: HashMap<Arc<str>, ParamType>,
}

impl ParamTypeRegistry {
    /// A registry without any tags. The parser still falls back to the
    /// built-in `string` type for untagged parameters.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Add a tag, replacing any converter previously registered under it.
    pub fn register(&mut self, tag: &str, converter: Converter) -> &mut Self {
        let param_type = ParamType::new(tag, converter);
        self.types.insert(Arc::clone(&param_type.tag), param_type);
        self
    }

    #[must_use]
    pub fn resolve(&self, tag: &str) -> Option<&ParamType> {
        self.types.get(tag)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.types.keys().map(|t| t.as_ref()).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for ParamTypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(INT_TAG, convert_int);
        registry
    }
}
