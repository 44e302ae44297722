//! # cscan CLI entry point
//!
//! Parses command-line arguments, builds the backend client, and dispatches
//! to subcommand handlers.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cscan_cli::reports::{run_reports, ReportsArgs};
use cscan_cli::requirements::{run_requirements, RequirementsArgs};
use cscan_client::{ApiClient, ClientConfig};

/// Compliance Scan CLI
///
/// Upload company reports, follow their processing, read per-requirement
/// compliance results, and manage the regulatory requirement catalog.
#[derive(Parser, Debug)]
#[command(name = "cscan", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend API root. Overrides CSCAN_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds. Overrides CSCAN_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload, list, inspect, download, and delete reports.
    Reports(ReportsArgs),

    /// Manage regulatory requirements.
    Requirements(RequirementsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("cscan CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let client = match build_client(&cli) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(cscan_cli::EXIT_FAILURE);
        }
    };

    let result = match &cli.command {
        Commands::Reports(args) => run_reports(args, client).await,
        Commands::Requirements(args) => run_requirements(args, client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(cscan_cli::EXIT_FAILURE)
        }
    }
}

/// Environment configuration with command-line overrides applied.
fn build_client(cli: &Cli) -> anyhow::Result<ApiClient> {
    let env = ClientConfig::from_env().context("invalid environment configuration")?;
    let config = match (&cli.api_url, cli.timeout_secs) {
        (None, None) => env,
        (api_url, timeout_secs) => ClientConfig::new(
            api_url.as_deref().unwrap_or(env.base_url.as_str()),
            timeout_secs.unwrap_or(env.timeout_secs),
        )
        .context("invalid --api-url")?,
    };
    tracing::debug!(api_url = %config.base_url, "using backend");
    ApiClient::new(config).context("cannot build HTTP client")
}
