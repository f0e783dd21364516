//! Health-check command
//!
//! Polls every configured virtual-host endpoint in turn, each to success or
//! exhausted retries. Endpoints are never short-circuited: a failing one
//! does not stop the remaining checks, and each outcome is reported on its
//! own line before the overall verdict.

use anyhow::Result;
use clap::Args;
use colored::*;

use gantry_checks::EndpointCheck;
use gantry_core::{PollResult, PollSpec, poll_until_ready};

use crate::config::{
    DEFAULT_HEALTH_DELAY_SECS, DEFAULT_HEALTH_RETRIES, EndpointTarget, HealthConfig,
};

/// Arguments for the health check
#[derive(Args)]
pub struct HealthArgs {
    /// Base URL reaching the routing layer (e.g. http://127.0.0.1:8080)
    pub base_url: String,

    /// Endpoint to verify, as <host>=<expected_body>; repeatable
    #[arg(long = "check", required = true, value_name = "HOST=BODY")]
    pub checks: Vec<EndpointTarget>,

    /// Attempts per endpoint before giving up
    #[arg(long, env = "GANTRY_HEALTH_RETRIES", default_value_t = DEFAULT_HEALTH_RETRIES)]
    pub retries: u32,

    /// Seconds between attempts
    #[arg(long, env = "GANTRY_HEALTH_DELAY", default_value_t = DEFAULT_HEALTH_DELAY_SECS)]
    pub delay_seconds: u64,
}

/// Run the health check across all configured endpoints
pub async fn run(args: HealthArgs) -> Result<()> {
    let config = HealthConfig::new(args.base_url, args.checks, args.retries, args.delay_seconds);

    println!(
        "{}",
        format!(
            "Health-checking {} endpoint(s) via {} ({} attempts, {:?} apart)...",
            config.targets.len(),
            config.base_url,
            config.retries,
            config.delay
        )
        .bold()
    );

    let mut failures = Vec::new();

    for target in &config.targets {
        let result = check_endpoint(&config, target).await;

        if result.succeeded {
            println!(
                "{} {} healthy after {} attempt(s)",
                "✓".green(),
                target.host,
                result.attempts
            );
        } else {
            println!(
                "{} {} unhealthy after {} attempt(s): {}",
                "✗".red(),
                target.host,
                result.attempts,
                result.last_reason.as_deref().unwrap_or("no response observed")
            );
            failures.push(target.host.clone());
        }
    }

    if failures.is_empty() {
        println!("{}", "All endpoints healthy.".green().bold());
        Ok(())
    } else {
        anyhow::bail!(
            "{}/{} endpoint(s) failed health check: {}",
            failures.len(),
            config.targets.len(),
            failures.join(", ")
        )
    }
}

/// Poll one endpoint to success or exhausted retries
async fn check_endpoint(config: &HealthConfig, target: &EndpointTarget) -> PollResult {
    let check = EndpointCheck::new(&config.base_url, &target.host, &target.expected_body);
    let spec = PollSpec::new(
        format!("endpoint {}", target.host),
        config.poll_timeout(),
        config.delay,
    );

    poll_until_ready(&spec, || check.check()).await
}
