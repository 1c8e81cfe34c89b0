//! # Router Module
//!
//! The router module owns the routing table: the set of registered route
//! templates and the policy for choosing between several that could match the
//! same request path.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route templates once, at registration time
//! - Indexing routes by segment count
//! - Trying candidates in a stable, deterministic order
//! - Returning the matched route together with its typed parameters
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: At startup, application code registers templates
//!    (e.g., `users/{id:int}`) with an HTTP method and a handler name. A
//!    malformed template fails that registration with a
//!    [`RouteSyntaxError`](crate::template::RouteSyntaxError).
//!
//! 2. **Matching**: For each request, only routes with the same segment count
//!    are tried, in [`RouteOrder`], until one matches.
//!
//! ## Example
//!
//! ```rust
//! use ctrlroute::router::{RouteOrder, RouteTable};
//! use http::Method;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = RouteTable::new(RouteOrder::Specificity);
//! table.register(Method::GET, "users/{name}", "user_by_name")?;
//! table.register(Method::GET, "users/me", "current_user")?;
//!
//! let m = table.route(&Method::GET, "/users/me").unwrap();
//! assert_eq!(m.handler_name(), "current_user");
//!
//! let m = table.route(&Method::GET, "/users/alice").unwrap();
//! assert_eq!(m.params.get_str("name"), Some("alice"));
//! # Ok(())
//! # }
//! ```

mod core;

pub use self::core::{RouteEntry, RouteMatch, RouteOrder, RouteTable, DEFAULT_SLOW_MATCH_THRESHOLD};
