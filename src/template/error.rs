use std::fmt;

/// Route template syntax error
///
/// Returned by [`TemplateParser::parse`](super::TemplateParser::parse) when a
/// template is malformed. Registration of the offending route should stop;
/// the error is not recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSyntaxError {
    /// A segment uses `{`, `}` or `:` without being exactly `{<content>}`,
    /// or the braces are nested.
    BadPath {
        /// The full template being parsed
        template: String,
    },
    /// The type tag after `:` is not registered.
    UnknownType {
        /// The unresolved type tag
        tag: String,
        /// The full template being parsed
        template: String,
    },
    /// A typed parameter has nothing before the `:` (e.g. `{:int}`).
    EmptyParameterName {
        /// The full template being parsed
        template: String,
    },
    /// The same parameter name appears twice in one template.
    DuplicateParameter {
        /// The repeated name
        name: String,
        /// The full template being parsed
        template: String,
    },
}

impl RouteSyntaxError {
    /// The template that failed to parse.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            RouteSyntaxError::BadPath { template }
            | RouteSyntaxError::UnknownType { template, .. }
            | RouteSyntaxError::EmptyParameterName { template }
            | RouteSyntaxError::DuplicateParameter { template, .. } => template,
        }
    }
}

impl fmt::Display for RouteSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSyntaxError::BadPath { template } => {
                write!(f, "Bad controller path: {}", template)
            }
            RouteSyntaxError::UnknownType { tag, template } => {
                write!(
                    f,
                    "Undefined controller parameter type '{}', path: {}",
                    tag, template
                )
            }
            RouteSyntaxError::EmptyParameterName { template } => {
                write!(f, "Empty controller parameter name, path: {}", template)
            }
            RouteSyntaxError::DuplicateParameter { name, template } => {
                write!(
                    f,
                    "Duplicate controller parameter '{}', path: {}",
                    name, template
                )
            }
        }
    }
}

impl std::error::Error for RouteSyntaxError {}
