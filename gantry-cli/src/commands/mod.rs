//! Commands module
//!
//! Defines all CLI subcommands and their handlers.

mod deployment;
mod health;
mod ingress;

pub use deployment::DeploymentArgs;
pub use health::HealthArgs;
pub use ingress::IngressArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Wait for a deployment rollout to complete
    Deployment(DeploymentArgs),
    /// Wait for an ingress to become routable
    Ingress(IngressArgs),
    /// Health-check routed HTTP endpoints
    Health(HealthArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `kubectl` - The kubectl binary to use for cluster queries
pub async fn handle_command(command: Commands, kubectl: &str) -> Result<()> {
    match command {
        Commands::Deployment(args) => deployment::run(args, kubectl).await,
        Commands::Ingress(args) => ingress::run(args, kubectl).await,
        Commands::Health(args) => health::run(args).await,
    }
}
