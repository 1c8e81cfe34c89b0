use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use crate::manifest::load_manifest;
use crate::matcher::Bindings;
use crate::router::RouteTable;
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for ctrlroute
///
/// Validates route manifests and resolves request paths against them.
#[derive(Parser)]
#[command(name = "ctrlroute")]
#[command(about = "Controller route template checker", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides CTRLROUTE_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile every route in a manifest and report syntax errors
    Check {
        /// Path to the route manifest (TOML)
        #[arg(short, long, env = "CTRLROUTE_ROUTES")]
        routes: PathBuf,
    },
    /// Print the routing table in match order
    Routes {
        /// Path to the route manifest (TOML)
        #[arg(short, long, env = "CTRLROUTE_ROUTES")]
        routes: PathBuf,
    },
    /// Resolve a request path and print the match as JSON
    Match {
        /// Path to the route manifest (TOML)
        #[arg(short, long, env = "CTRLROUTE_ROUTES")]
        routes: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /users/42
        path: String,
    },
}

/// JSON shape printed by `ctrlroute match`
#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    method: &'a str,
    handler: &'a str,
    template: &'a str,
    params: &'a Bindings,
}

fn load_table(routes: &Path) -> anyhow::Result<RouteTable> {
    load_manifest(routes)?.build_table_with(&RuntimeConfig::from_env())
}

/// Run a parsed command line.
///
/// Returns exit code 1 when `match` finds no route. Every other failure is
/// reported through the error.
pub fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Check { routes } => {
            let table = load_table(routes)?;
            println!(
                "ok: {} route(s) compiled from {}",
                table.len(),
                routes.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes { routes } => {
            let table = load_table(routes)?;
            table.log_summary();
            table.dump_routes();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match {
            routes,
            method,
            path,
        } => {
            let table = load_table(routes)?;
            let method = Method::from_str(&method.to_uppercase())
                .with_context(|| format!("Invalid HTTP method: {method}"))?;

            match table.route(&method, path) {
                Some(m) => {
                    let report = MatchReport {
                        method: method.as_str(),
                        handler: m.handler_name(),
                        template: m.route.template(),
                        params: &m.params,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no match: {method} {path}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
