//! Gantry CLI
//!
//! Readiness gate for Kubernetes CI pipelines: wait for a deployment
//! rollout, wait for an ingress to become routable, and health-check routed
//! HTTP endpoints. Every subcommand exits 0 on success and 1 on any failure
//! so it can gate a pipeline stage directly.

mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Kubernetes readiness gate for CI pipelines", long_about = None)]
struct Cli {
    /// kubectl binary used for cluster queries
    #[arg(long, env = "GANTRY_KUBECTL", default_value = "kubectl")]
    kubectl: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing required argument must exit 1, not clap's default 2, so the
    // CLI reports a uniform failure code to the pipeline.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match handle_command(cli.command, &cli.kubectl).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
