//! # ctrlroute
//!
//! **ctrlroute** is a controller routing engine: route templates such as
//! `users/{id:int}/profile` are compiled once at startup into typed patterns,
//! and every incoming request path is matched against them to pick a handler
//! and extract its parameters as typed values.
//!
//! ## Overview
//!
//! The engine consumes raw path strings and declared templates and produces
//! match results. It does not read HTTP requests, resolve dependencies or
//! invoke controllers; those belong to the surrounding application.
//!
//! ## Architecture
//!
//! - **[`template`]** - Template grammar, tokenization and validation
//!   ([`template::parse`] → [`template::CompiledPattern`])
//! - **[`params`]** - Parameter type tags (`string`, `int`) and their
//!   converters; new tags are registered, not reflected
//! - **[`matcher`]** - Single-pass matching of a path against one pattern
//! - **[`router`]** - Route table with segment-count index and deterministic
//!   tie-breaking ([`router::RouteOrder`])
//! - **[`manifest`]** - Route declarations loaded from TOML
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven settings
//!   and `tracing` subscriber setup
//! - **[`cli`]** - The `ctrlroute` command-line tool
//!
//! ### Request Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as Application
//!     participant Table as RouteTable
//!     participant Parser as TemplateParser
//!     participant Matcher as matcher::match_path
//!
//!     App->>Table: register(GET, "users/{id:int}", "get_user")
//!     Table->>Parser: parse(template)
//!     Parser-->>Table: CompiledPattern | RouteSyntaxError
//!
//!     App->>Table: route(GET, "/users/42")
//!     Table->>Table: bucket by segment count
//!     loop candidates in RouteOrder
//!         Table->>Matcher: match_path(pattern, path)
//!         Matcher-->>Table: Some(bindings) | None
//!     end
//!     Table-->>App: RouteMatch { handler, {id: 42} }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ctrlroute::{template::parse, ParamValue};
//!
//! let pattern = parse("users/{id:int}/profile").unwrap();
//!
//! let bindings = pattern.match_path("/users/42/profile").unwrap();
//! assert_eq!(bindings.get("id"), Some(&ParamValue::Int(42)));
//!
//! // Type mismatch is a plain no-match, not an error
//! assert!(pattern.match_path("/users/abc/profile").is_none());
//! ```
//!
//! ## Concurrency
//!
//! Compiled patterns and built route tables are immutable and `Send + Sync`.
//! Matching only reads them and returns freshly owned bindings, so any
//! number of request threads can share one table without locking.

pub mod cli;
pub mod logging;
pub mod manifest;
pub mod matcher;
pub mod params;
pub mod router;
pub mod runtime_config;
pub mod template;

pub use manifest::{load_manifest, RouteManifest};
pub use matcher::{match_path, Bindings};
pub use params::{ParamType, ParamTypeRegistry, ParamValue};
pub use router::{RouteMatch, RouteOrder, RouteTable};
pub use template::{parse, CompiledPattern, PathItem, RouteSyntaxError, TemplateParser};
