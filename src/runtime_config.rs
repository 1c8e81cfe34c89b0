//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for route table behavior.
//!
//! ## Environment Variables
//!
//! ### `CTRLROUTE_ROUTE_ORDER`
//!
//! How candidate routes are ordered when several could match a path:
//! - `specificity` (default): more literal segments first
//! - `declaration`: registration order
//!
//! ### `CTRLROUTE_SLOW_MATCH_US`
//!
//! Matches slower than this many microseconds are logged at `warn`.
//!
//! Default: `1000` (1 ms)
//!
//! Invalid values fall back to the defaults.
//!
//! ## Usage
//!
//! ```rust
//! use ctrlroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! let table = config.route_table();
//! assert!(table.is_empty());
//! ```

use std::env;
use std::time::Duration;

use crate::router::{RouteOrder, RouteTable, DEFAULT_SLOW_MATCH_THRESHOLD};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Tie-break policy for new route tables
    pub route_order: RouteOrder,
    /// Threshold above which a match is reported as slow
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            route_order: RouteOrder::default(),
            slow_match_threshold: DEFAULT_SLOW_MATCH_THRESHOLD,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let route_order = lookup("CTRLROUTE_ROUTE_ORDER")
            .and_then(|val| val.parse().ok())
            .unwrap_or(defaults.route_order);

        let slow_match_threshold = lookup("CTRLROUTE_SLOW_MATCH_US")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(Duration::from_micros)
            .unwrap_or(defaults.slow_match_threshold);

        RuntimeConfig {
            route_order,
            slow_match_threshold,
        }
    }

    /// An empty route table using this configuration.
    #[must_use]
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.route_order).with_slow_match_threshold(self.slow_match_threshold)
    }
}
