//! route-match CLI
//!
//! Loads a JSON route table and reports which route a request would hit.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use route_matcher::{Method, Request, RouteTableConfig};

/// Resolve a request against a route table.
#[derive(Parser)]
#[command(name = "route-match")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route table file (JSON).
    #[arg(short, long, env = "ROUTE_TABLE", default_value = "routes.json")]
    routes: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP method of the request.
    method: Method,

    /// Request target; a query string or fragment is ignored.
    target: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RouteTableConfig::from_path(&cli.routes)?;
    let matcher = config.build_matcher()?;
    debug!(routes = matcher.len(), file = %cli.routes.display(), "Loaded route table");

    let request = Request::new(cli.method, &cli.target);
    let Some(found) = matcher.match_route(request.method, &request.path) else {
        println!("{}", serde_json::json!({ "matched": false, "path": request.path }));
        return Ok(ExitCode::FAILURE);
    };

    let params: serde_json::Map<String, serde_json::Value> = found
        .params()
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
        .collect();

    let report = serde_json::json!({
        "matched": true,
        "index": found.index(),
        "template": found.template(),
        "method": found.method().as_str(),
        "dispatch": found.dispatch().as_str(),
        "params": params,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(ExitCode::SUCCESS)
}
