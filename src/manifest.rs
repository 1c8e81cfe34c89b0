//! Route manifest for explicit route registration
//!
//! Applications can declare their routes in a TOML file instead of calling
//! [`RouteTable::register`] by hand:
//!
//! ```toml
//! order = "specificity"   # optional: "declaration" | "specificity"
//!
//! [[routes]]
//! method = "GET"          # optional, defaults to GET
//! path = "users/{id:int}/profile"
//! handler = "user_profile"
//! ```

use anyhow::{anyhow, Context};
use http::Method;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::router::{RouteOrder, RouteTable};
use crate::runtime_config::RuntimeConfig;

/// One `[[routes]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RouteDecl {
    /// HTTP method name
    #[serde(default = "default_method")]
    pub method: String,
    /// Route template
    pub path: String,
    /// Handler the route dispatches to
    pub handler: String,
}

fn default_method() -> String {
    Method::GET.to_string()
}

/// Parsed manifest file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RouteManifest {
    /// Overrides the configured route order when present
    #[serde(default)]
    pub order: Option<RouteOrder>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

impl RouteManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse route manifest")
    }

    /// Build a route table with default runtime settings.
    pub fn build_table(&self) -> anyhow::Result<RouteTable> {
        self.build_table_with(&RuntimeConfig::default())
    }

    /// Build a route table, registering every declared route in file order.
    ///
    /// The manifest's `order` wins over `config.route_order`. The first
    /// invalid route aborts the build with an error naming it.
    pub fn build_table_with(&self, config: &RuntimeConfig) -> anyhow::Result<RouteTable> {
        let order = self.order.unwrap_or(config.route_order);
        let mut table =
            RouteTable::new(order).with_slow_match_threshold(config.slow_match_threshold);

        for (i, decl) in self.routes.iter().enumerate() {
            let method = Method::from_str(&decl.method.to_uppercase()).map_err(|e| {
                anyhow!(
                    "route #{} ({}): invalid method '{}': {}",
                    i + 1,
                    decl.path,
                    decl.method,
                    e
                )
            })?;
            table
                .register(method, &decl.path, &decl.handler)
                .with_context(|| format!("route #{} ({} -> {})", i + 1, decl.path, decl.handler))?;
        }

        info!(
            routes_count = table.len(),
            route_order = %order,
            "Route manifest loaded"
        );

        Ok(table)
    }
}

/// Load a manifest from disk.
pub fn load_manifest(path: &Path) -> anyhow::Result<RouteManifest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route manifest: {}", path.display()))?;

    RouteManifest::from_toml_str(&contents)
        .with_context(|| format!("Invalid route manifest: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
order = "declaration"

[[routes]]
path = "users/{id:int}"
handler = "get_user"

[[routes]]
method = "post"
path = "users"
handler = "create_user"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = RouteManifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(manifest.order, Some(RouteOrder::Declaration));
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].method, "GET");
        assert_eq!(manifest.routes[1].method, "post");
    }

    #[test]
    fn test_build_table() {
        let table = RouteManifest::from_toml_str(MANIFEST)
            .unwrap()
            .build_table()
            .unwrap();
        assert_eq!(table.order(), RouteOrder::Declaration);
        assert_eq!(
            table.route(&Method::POST, "/users").unwrap().handler_name(),
            "create_user"
        );
        assert_eq!(
            table
                .route(&Method::GET, "/users/5")
                .unwrap()
                .params
                .get_int("id"),
            Some(5)
        );
    }

    #[test]
    fn test_order_falls_back_to_config() {
        let manifest = RouteManifest::from_toml_str("").unwrap();
        let config = RuntimeConfig {
            route_order: RouteOrder::Declaration,
            ..RuntimeConfig::default()
        };
        assert_eq!(
            manifest.build_table_with(&config).unwrap().order(),
            RouteOrder::Declaration
        );
    }

    #[test]
    fn test_syntax_error_names_route() {
        let manifest = RouteManifest::from_toml_str(
            r#"
[[routes]]
path = "item/{code:guid}"
handler = "get_item"
"#,
        )
        .unwrap();
        let err = manifest.build_table().unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("route #1 (item/{code:guid} -> get_item)"));
        assert!(message.contains("Undefined controller parameter type 'guid'"));
    }

    #[test]
    fn test_invalid_method() {
        let manifest = RouteManifest::from_toml_str(
            r#"
[[routes]]
method = "GE T"
path = "a"
handler = "a"
"#,
        )
        .unwrap();
        let err = manifest.build_table().unwrap_err();
        assert!(err.to_string().contains("invalid method 'GE T'"));
    }

    #[test]
    fn test_unknown_order_is_rejected() {
        assert!(RouteManifest::from_toml_str("order = \"random\"").is_err());
    }
}
