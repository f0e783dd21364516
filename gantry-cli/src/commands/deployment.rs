//! Deployment wait command
//!
//! Polls the deployment's replica counters until every desired replica is
//! ready or the deadline passes. On timeout the resource description and
//! pod list are dumped before failing, so the CI log carries the evidence.

use anyhow::Result;
use clap::Args;
use colored::*;
use tracing::warn;

use gantry_checks::{DeploymentCheck, Kubectl};
use gantry_core::{PollSpec, poll_until_ready};

use crate::config::{DEFAULT_DEPLOY_TIMEOUT_SECS, DeploymentWaitConfig};

/// Arguments for the deployment wait
#[derive(Args)]
pub struct DeploymentArgs {
    /// Namespace the deployment lives in
    #[arg(env = "GANTRY_NAMESPACE")]
    pub namespace: String,

    /// Deployment name
    pub name: String,

    /// Seconds to wait before giving up
    #[arg(env = "GANTRY_DEPLOY_TIMEOUT", default_value_t = DEFAULT_DEPLOY_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

/// Run the deployment wait
pub async fn run(args: DeploymentArgs, kubectl: &str) -> Result<()> {
    let config = DeploymentWaitConfig::new(args.namespace, args.name, args.timeout_seconds);
    let kubectl = Kubectl::new(kubectl);

    println!(
        "{}",
        format!(
            "Waiting for deployment {}/{} (timeout {:?})...",
            config.namespace, config.name, config.timeout
        )
        .bold()
    );

    let check = DeploymentCheck::new(kubectl.clone(), config.namespace.clone(), config.name.clone());
    let spec = PollSpec::new(
        format!("deployment {}/{}", config.namespace, config.name),
        config.timeout,
        config.interval,
    );

    let result = poll_until_ready(&spec, || check.check()).await;

    if result.succeeded {
        println!(
            "{} deployment {}/{} ready after {:.1?} ({} attempt(s))",
            "✓".green(),
            config.namespace,
            config.name,
            result.elapsed,
            result.attempts
        );
        return Ok(());
    }

    println!(
        "{} deployment {}/{} not ready after {:.1?} ({} attempt(s)): {}",
        "✗".red(),
        config.namespace,
        config.name,
        result.elapsed,
        result.attempts,
        result.last_reason.as_deref().unwrap_or("no status observed")
    );

    dump_diagnostics(&kubectl, &config.namespace, "deployment", &config.name).await;

    anyhow::bail!(
        "deployment {}/{} did not become ready within {:?}",
        config.namespace,
        config.name,
        config.timeout
    )
}

/// Best-effort dump of the resource description and pod list after a timeout
pub(crate) async fn dump_diagnostics(kubectl: &Kubectl, namespace: &str, kind: &str, name: &str) {
    println!("{}", format!("--- describe {kind} {namespace}/{name} ---").dimmed());
    if let Err(e) = kubectl.describe(namespace, kind, name).await {
        warn!("failed to describe {} {}/{}: {}", kind, namespace, name, e);
    }

    println!("{}", format!("--- pods in {namespace} ---").dimmed());
    if let Err(e) = kubectl.list_pods(namespace).await {
        warn!("failed to list pods in {}: {}", namespace, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_NAMESPACE;

    #[test]
    fn default_surface_matches_observed_usage() {
        let args = DeploymentArgs {
            namespace: DEFAULT_NAMESPACE.to_string(),
            name: "demo-echo".to_string(),
            timeout_seconds: DEFAULT_DEPLOY_TIMEOUT_SECS,
        };
        let config = DeploymentWaitConfig::new(args.namespace, args.name, args.timeout_seconds);
        assert_eq!(config.namespace, "default");
        assert_eq!(config.timeout.as_secs(), 300);
        assert_eq!(config.interval.as_secs(), 5);
    }
}
