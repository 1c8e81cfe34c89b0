use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::RouteSyntaxError;
use crate::matcher::{self, Bindings};
use crate::params::{ParamType, ParamTypeRegistry};

/// Whole-segment grammar for a parameter placeholder: `{`, one or more
/// characters, `}`.
static PARAM_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{.+\}$").expect("Failed to compile parameter segment regex"));

/// Characters that mark a segment as a parameter placeholder.
const PLACEHOLDER_CHARS: [char; 3] = ['{', '}', ':'];

/// Split a template or request path on `/`, dropping empty segments.
///
/// Leading, trailing and repeated slashes collapse, so `/a//b/` and `a/b`
/// produce the same segments.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// One position of a compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathItem {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Matches any segment that converts to `param_type`, bound under `name`.
    Parameter {
        name: Arc<str>,
        param_type: ParamType,
    },
}

impl PathItem {
    #[must_use]
    pub fn literal(segment: impl Into<String>) -> Self {
        PathItem::Literal(segment.into())
    }

    #[must_use]
    pub fn parameter(name: &str, param_type: ParamType) -> Self {
        PathItem::Parameter {
            name: Arc::from(name),
            param_type,
        }
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, PathItem::Literal(_))
    }
}

impl fmt::Display for PathItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathItem::Literal(segment) => write!(f, "{segment}"),
            PathItem::Parameter { name, param_type } if param_type.is_string() => {
                write!(f, "{{{name}}}")
            }
            PathItem::Parameter { name, param_type } => {
                write!(f, "{{{name}:{}}}", param_type.tag())
            }
        }
    }
}

/// A parsed route template, ready for repeated matching.
///
/// Immutable once built. Equality compares the item sequence only, so
/// `a/b` and `/a/b/` compile to equal patterns.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: Arc<str>,
    items: Vec<PathItem>,
}

impl CompiledPattern {
    /// Build a pattern directly from items. The caller is responsible for
    /// parameter name uniqueness.
    #[must_use]
    pub fn from_items(items: Vec<PathItem>) -> Self {
        let template = items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        Self {
            template: Arc::from(template),
            items,
        }
    }

    /// The template string this pattern was parsed from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn items(&self) -> &[PathItem] {
        &self.items
    }

    /// Number of segments a request path must have to match.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_literal()).count()
    }

    /// Parameter names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PathItem::Parameter { name, .. } => Some(name.as_ref()),
            PathItem::Literal(_) => None,
        })
    }

    /// Match a request path against this pattern.
    ///
    /// See [`matcher::match_path`].
    #[inline]
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Bindings> {
        matcher::match_path(self, path)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for CompiledPattern {}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Compiles route templates into [`CompiledPattern`]s.
///
/// Type tags resolve through the parser's [`ParamTypeRegistry`]. Untagged
/// parameters are always `string`, even when the registry has no `string` tag.
#[derive(Debug, Clone, Default)]
pub struct TemplateParser {
    registry: ParamTypeRegistry,
}

impl TemplateParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_registry(registry: ParamTypeRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ParamTypeRegistry {
        &self.registry
    }

    /// Parse a route template.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteSyntaxError`] when a placeholder segment is malformed,
    /// uses an unregistered type tag, has an empty name, or repeats a name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ctrlroute::template::{PathItem, TemplateParser};
    ///
    /// let pattern = TemplateParser::new().parse("users/{id:int}/profile").unwrap();
    /// assert_eq!(pattern.len(), 3);
    /// assert_eq!(pattern.items()[0], PathItem::literal("users"));
    /// ```
    pub fn parse(&self, template: &str) -> Result<CompiledPattern, RouteSyntaxError> {
        let mut items = Vec::with_capacity(template.matches('/').count() + 1);

        for segment in split_segments(template) {
            if !segment.contains(PLACEHOLDER_CHARS) {
                items.push(PathItem::literal(segment));
                continue;
            }

            let (name, param_type) = self.parse_placeholder(segment, template)?;

            let duplicate = items.iter().any(|item| {
                matches!(item, PathItem::Parameter { name: existing, .. } if existing.as_ref() == name)
            });
            if duplicate {
                return Err(RouteSyntaxError::DuplicateParameter {
                    name: name.to_string(),
                    template: template.to_string(),
                });
            }

            items.push(PathItem::parameter(name, param_type));
        }

        debug!(
            template = %template,
            segments = items.len(),
            "Route template compiled"
        );

        Ok(CompiledPattern {
            template: Arc::from(template),
            items,
        })
    }

    fn parse_placeholder<'a>(
        &self,
        segment: &'a str,
        template: &str,
    ) -> Result<(&'a str, ParamType), RouteSyntaxError> {
        let bad_path = || RouteSyntaxError::BadPath {
            template: template.to_string(),
        };

        if !PARAM_SEGMENT.is_match(segment) {
            return Err(bad_path());
        }

        // The grammar guarantees single-byte braces at both ends.
        let inner = &segment[1..segment.len() - 1];
        if inner.contains(['{', '}']) {
            return Err(bad_path());
        }

        let (name, param_type) = match inner.split_once(':') {
            Some((name, tag)) => {
                let param_type = self.registry.resolve(tag).cloned().ok_or_else(|| {
                    RouteSyntaxError::UnknownType {
                        tag: tag.to_string(),
                        template: template.to_string(),
                    }
                })?;
                (name, param_type)
            }
            None => (inner, ParamType::string()),
        };

        if name.is_empty() {
            return Err(RouteSyntaxError::EmptyParameterName {
                template: template.to_string(),
            });
        }

        Ok((name, param_type))
    }
}

/// Parse a template with the default type table (`int` only).
///
/// # Errors
///
/// See [`TemplateParser::parse`].
pub fn parse(template: &str) -> Result<CompiledPattern, RouteSyntaxError> {
    TemplateParser::new().parse(template)
}
