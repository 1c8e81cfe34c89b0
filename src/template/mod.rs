//! # Template Module
//!
//! Compiles declarative route templates such as `users/{id:int}/profile`
//! into [`CompiledPattern`]s: ordered sequences of literal segments and typed
//! parameters.
//!
//! ## Grammar
//!
//! A template is split on `/` with empty segments discarded. Each segment is
//! then one of:
//!
//! - **Literal** - contains none of `{`, `}`, `:`; matched verbatim
//! - **Parameter** - exactly `{name}` (type `string`) or `{name:tag}`, where
//!   `tag` resolves through a [`ParamTypeRegistry`](crate::params::ParamTypeRegistry)
//!
//! Anything else that uses those characters (`{id`, `a:b`, `{{id}}`, `{}`)
//! is a [`RouteSyntaxError`]. The type tag is everything after the first `:`.
//!
//! ## Example
//!
//! ```rust
//! use ctrlroute::template::parse;
//!
//! let pattern = parse("/users/{id:int}/profile").unwrap();
//! assert_eq!(pattern.to_string(), "users/{id:int}/profile");
//! assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
//!
//! assert!(parse("item/{code:guid}").is_err());
//! ```

mod core;
mod error;

pub use self::core::{parse, split_segments, CompiledPattern, PathItem, TemplateParser};
pub use error::RouteSyntaxError;
