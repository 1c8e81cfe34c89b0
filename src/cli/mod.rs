//! # CLI Module
//!
//! Command-line access to the routing engine, mainly for checking route
//! manifests in CI and debugging why a path does or does not match.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Compile every route in a manifest; exits non-zero on the first syntax error:
//!
//! ```bash
//! ctrlroute check --routes routes.toml
//! ```
//!
//! ### `routes`
//!
//! Print the table in the order lookups try it:
//!
//! ```bash
//! ctrlroute routes --routes routes.toml
//! ```
//!
//! ### `match`
//!
//! Resolve a request path and print the handler and typed parameters as JSON;
//! exits with status 1 when nothing matches:
//!
//! ```bash
//! ctrlroute match --routes routes.toml --method GET /users/42/profile
//! ```
//!
//! `--routes` can also come from `CTRLROUTE_ROUTES`.

mod commands;


pub use commands::{run_cli, Cli, Commands};
