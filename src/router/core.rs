//! Router core module - registration and per-request lookup.

use http::Method;
use serde::Deserialize;
use std::cmp::{Ordering, Reverse};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::matcher::{self, Bindings, SegmentVec};
use crate::params::ParamValue;
use crate::template::{split_segments, CompiledPattern, PathItem, RouteSyntaxError, TemplateParser};

/// Matches slower than this are logged at `warn`.
pub const DEFAULT_SLOW_MATCH_THRESHOLD: Duration = Duration::from_millis(1);

/// Order in which candidate routes are tried when several could match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOrder {
    /// Registration order; the first registered match wins.
    Declaration,
    /// Most specific first: more literal segments, then literals at earlier
    /// positions, then typed parameters before `string` ones. Ties keep
    /// registration order.
    #[default]
    Specificity,
}

impl RouteOrder {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOrder::Declaration => "declaration",
            RouteOrder::Specificity => "specificity",
        }
    }
}

impl fmt::Display for RouteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declaration" => Ok(RouteOrder::Declaration),
            "specificity" => Ok(RouteOrder::Specificity),
            other => Err(format!(
                "unknown route order '{other}', expected 'declaration' or 'specificity'"
            )),
        }
    }
}

/// A registered route: verb, compiled pattern and the handler it maps to.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: CompiledPattern,
    pub handler_name: Arc<str>,
    /// Registration index, used to keep ties stable.
    pub index: usize,
    specificity: SpecificityKey,
}

/// Sort key under [`RouteOrder::Specificity`]: more literals first, then
/// per-position item ranks. Smaller is tried first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SpecificityKey {
    literals: Reverse<usize>,
    ranks: SmallVec<[u8; 16]>,
}

impl SpecificityKey {
    fn of(pattern: &CompiledPattern) -> Self {
        Self {
            literals: Reverse(pattern.literal_count()),
            ranks: pattern.items().iter().map(item_rank).collect(),
        }
    }
}

impl RouteEntry {
    fn new(method: Method, pattern: CompiledPattern, handler_name: &str, index: usize) -> Self {
        let specificity = SpecificityKey::of(&pattern);
        Self {
            method,
            pattern,
            handler_name: Arc::from(handler_name),
            index,
            specificity,
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Compare two routes under [`RouteOrder::Specificity`]; `Less` means
    /// `self` is tried first.
    fn cmp_specificity(&self, other: &Self) -> Ordering {
        self.specificity
            .cmp(&other.specificity)
            .then_with(|| self.index.cmp(&other.index))
    }
}

fn item_rank(item: &PathItem) -> u8 {
    match item {
        PathItem::Literal(_) => 0,
        PathItem::Parameter { param_type, .. } if !param_type.is_string() => 1,
        PathItem::Parameter { .. } => 2,
    }
}

/// Result of successfully routing a request path.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared with the table)
    pub route: Arc<RouteEntry>,
    /// Typed parameter bindings (e.g., `{id:int}` → `{"id": 123}`)
    pub params: Bindings,
}

impl RouteMatch {
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.route.handler_name
    }

    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

/// Routing table built at startup from explicit registrations.
///
/// Routes are bucketed by segment count, since a pattern can only match a
/// path with exactly as many segments. Each bucket is kept sorted by the
/// table's [`RouteOrder`], and lookup returns the first route in that order
/// whose method and pattern both match.
///
/// Lookups only read the table, so a fully built table can serve concurrent
/// requests without locking.
#[derive(Debug, Clone)]
pub struct RouteTable {
    parser: TemplateParser,
    order: RouteOrder,
    /// All routes in registration order
    routes: Vec<Arc<RouteEntry>>,
    /// Segment count → candidate routes in match order
    by_length: HashMap<usize, Vec<Arc<RouteEntry>>>,
    slow_match_threshold: Duration,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteOrder::default())
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(order: RouteOrder) -> Self {
        Self {
            parser: TemplateParser::new(),
            order,
            routes: Vec::new(),
            by_length: HashMap::new(),
            slow_match_threshold: DEFAULT_SLOW_MATCH_THRESHOLD,
        }
    }

    /// Use a parser with a custom type registry for later registrations.
    #[must_use]
    pub fn with_parser(mut self, parser: TemplateParser) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_slow_match_threshold(mut self, threshold: Duration) -> Self {
        self.slow_match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn order(&self) -> RouteOrder {
        self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<RouteEntry>] {
        &self.routes
    }

    /// Registered templates in registration order.
    #[must_use]
    pub fn templates(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.template()).collect()
    }

    /// Routes in the order lookups try them: shorter patterns first, then
    /// each length bucket in match order.
    #[must_use]
    pub fn ordered_routes(&self) -> Vec<Arc<RouteEntry>> {
        let mut lengths: Vec<_> = self.by_length.keys().copied().collect();
        lengths.sort_unstable();
        lengths
            .into_iter()
            .filter_map(|len| self.by_length.get(&len))
            .flat_map(|bucket| bucket.iter().cloned())
            .collect()
    }

    /// Parse `template` and register it for `method`.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteSyntaxError`] from parsing. The table is left
    /// unchanged in that case.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        handler_name: &str,
    ) -> Result<(), RouteSyntaxError> {
        let pattern = self.parser.parse(template)?;
        self.insert(method, pattern, handler_name);
        Ok(())
    }

    /// Register an already compiled pattern.
    pub fn insert(&mut self, method: Method, pattern: CompiledPattern, handler_name: &str) {
        let shadowed_by = self
            .routes
            .iter()
            .find(|r| r.method == method && r.pattern == pattern)
            .map(|r| Arc::clone(&r.handler_name));
        if let Some(existing) = shadowed_by {
            warn!(
                method = %method,
                template = %pattern.template(),
                handler_name = %handler_name,
                existing_handler = %existing,
                "Route is shadowed by an earlier registration"
            );
        }

        let entry = Arc::new(RouteEntry::new(method, pattern, handler_name, self.routes.len()));

        debug!(
            method = %entry.method,
            template = %entry.template(),
            handler_name = %entry.handler_name,
            segments = entry.pattern.len(),
            "Route registered"
        );

        let bucket = self.by_length.entry(entry.pattern.len()).or_default();
        let position = match self.order {
            RouteOrder::Declaration => bucket.len(),
            // the new entry has the highest index, so it goes after every tie
            RouteOrder::Specificity => {
                bucket.partition_point(|r| r.cmp_specificity(&entry) == Ordering::Less)
            }
        };
        bucket.insert(position, Arc::clone(&entry));

        self.routes.push(entry);
    }

    /// Print all registered routes to stdout in match order
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!("[routes] order={} count={}", self.order, self.routes.len());
        for route in self.ordered_routes() {
            println!(
                "[route] {} {} -> {}",
                route.method,
                route.pattern,
                route.handler_name
            );
        }
    }

    /// Log a summary of the routing table.
    pub fn log_summary(&self) {
        let routes_summary: Vec<String> = self
            .ordered_routes()
            .iter()
            .take(10)
            .map(|r| format!("{} {} -> {}", r.method, r.template(), r.handler_name))
            .collect();

        info!(
            routes_count = self.routes.len(),
            route_order = %self.order,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }

    /// Find the route for `method` and `path`.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - first route, in table order, that matches
    /// * `None` - no route matches (typically a 404 for the caller)
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.find(Some(method), path)
    }

    /// Like [`route`](Self::route) but ignores the HTTP method.
    #[must_use]
    pub fn route_any(&self, path: &str) -> Option<RouteMatch> {
        self.find(None, path)
    }

    fn find(&self, method: Option<&Method>, path: &str) -> Option<RouteMatch> {
        let match_start = Instant::now();

        let segments: SegmentVec<'_> = split_segments(path).collect();
        let result = self
            .by_length
            .get(&segments.len())
            .and_then(|bucket| {
                bucket
                    .iter()
                    .filter(|r| method.map_or(true, |m| r.method == *m))
                    .find_map(|r| {
                        let params = matcher::match_segments(&r.pattern, &segments)?;
                        Some(RouteMatch {
                            route: Arc::clone(r),
                            params,
                        })
                    })
            });

        let match_duration = match_start.elapsed();
        let method_label = method.map_or("*", Method::as_str);

        match &result {
            Some(m) => {
                if match_duration > self.slow_match_threshold {
                    warn!(
                        method = %method_label,
                        path = %path,
                        handler_name = %m.route.handler_name,
                        route_pattern = %m.route.template(),
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method_label,
                        path = %path,
                        handler_name = %m.route.handler_name,
                        route_pattern = %m.route.template(),
                        path_params = ?m.params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            None => {
                debug!(
                    method = %method_label,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }
}
