//! Ingress wait command
//!
//! Polls the ingress until it carries at least one routing rule, then holds
//! for a fixed settling delay: rule propagation to the routing layer is
//! asynchronous, so a freshly-ready ingress is not yet routable.

use anyhow::Result;
use clap::Args;
use colored::*;

use gantry_checks::{IngressCheck, Kubectl};
use gantry_core::{PollSpec, poll_until_ready, settle};

use super::deployment::dump_diagnostics;
use crate::config::{
    DEFAULT_INGRESS_TIMEOUT_SECS, DEFAULT_NAMESPACE, DEFAULT_SETTLE_SECS, IngressWaitConfig,
};

/// Arguments for the ingress wait
#[derive(Args)]
pub struct IngressArgs {
    /// Ingress name
    pub name: String,

    /// Seconds to wait before giving up
    #[arg(env = "GANTRY_INGRESS_TIMEOUT", default_value_t = DEFAULT_INGRESS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Namespace the ingress lives in
    #[arg(env = "GANTRY_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Seconds to hold after the ingress reports rules
    #[arg(long, env = "GANTRY_SETTLE_SECONDS", default_value_t = DEFAULT_SETTLE_SECS)]
    pub settle_seconds: u64,
}

/// Run the ingress wait
pub async fn run(args: IngressArgs, kubectl: &str) -> Result<()> {
    let config = IngressWaitConfig::new(
        args.name,
        args.timeout_seconds,
        args.namespace,
        args.settle_seconds,
    );
    let kubectl = Kubectl::new(kubectl);

    println!(
        "{}",
        format!(
            "Waiting for ingress {}/{} (timeout {:?})...",
            config.namespace, config.name, config.timeout
        )
        .bold()
    );

    let check = IngressCheck::new(kubectl.clone(), config.namespace.clone(), config.name.clone());
    let spec = PollSpec::new(
        format!("ingress {}/{}", config.namespace, config.name),
        config.timeout,
        config.interval,
    );

    let result = poll_until_ready(&spec, || check.check()).await;

    if !result.succeeded {
        println!(
            "{} ingress {}/{} not routable after {:.1?} ({} attempt(s)): {}",
            "✗".red(),
            config.namespace,
            config.name,
            result.elapsed,
            result.attempts,
            result.last_reason.as_deref().unwrap_or("no status observed")
        );

        dump_diagnostics(&kubectl, &config.namespace, "ingress", &config.name).await;

        anyhow::bail!(
            "ingress {}/{} did not become routable within {:?}",
            config.namespace,
            config.name,
            config.timeout
        );
    }

    println!(
        "{} ingress {}/{} has routing rules ({} attempt(s)); settling {:?} for propagation",
        "✓".green(),
        config.namespace,
        config.name,
        result.attempts,
        config.settle
    );

    settle(&spec.description, config.settle).await;

    println!(
        "{} ingress {}/{} routable after {:.1?}",
        "✓".green(),
        config.namespace,
        config.name,
        result.elapsed + config.settle
    );

    Ok(())
}
