//! Per-operation configuration
//!
//! Each wait operation gets an explicit, immutable config record built once
//! from CLI arguments and environment defaults. The poller itself never
//! reads ambient state.

use std::str::FromStr;
use std::time::Duration;

/// Default namespace when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default deployment wait deadline (seconds)
pub const DEFAULT_DEPLOY_TIMEOUT_SECS: u64 = 300;
/// Polling cadence for deployment readiness
pub const DEPLOY_INTERVAL: Duration = Duration::from_secs(5);

/// Default ingress wait deadline (seconds)
pub const DEFAULT_INGRESS_TIMEOUT_SECS: u64 = 120;
/// Polling cadence for ingress readiness
pub const INGRESS_INTERVAL: Duration = Duration::from_secs(3);
/// Default post-ready settling delay (seconds)
pub const DEFAULT_SETTLE_SECS: u64 = 10;

/// Default number of health-check attempts per endpoint
pub const DEFAULT_HEALTH_RETRIES: u32 = 20;
/// Default delay between health-check attempts (seconds)
pub const DEFAULT_HEALTH_DELAY_SECS: u64 = 3;

/// Configuration for one deployment wait
#[derive(Debug, Clone)]
pub struct DeploymentWaitConfig {
    pub namespace: String,
    pub name: String,
    pub timeout: Duration,
    pub interval: Duration,
}

impl DeploymentWaitConfig {
    /// Builds the record from resolved CLI arguments
    pub fn new(namespace: String, name: String, timeout_secs: u64) -> Self {
        Self {
            namespace,
            name,
            timeout: Duration::from_secs(timeout_secs),
            interval: DEPLOY_INTERVAL,
        }
    }
}

/// Configuration for one ingress wait
#[derive(Debug, Clone)]
pub struct IngressWaitConfig {
    pub namespace: String,
    pub name: String,
    pub timeout: Duration,
    pub interval: Duration,
    /// Fixed grace period applied after the ingress reports rules, to absorb
    /// asynchronous propagation to the routing layer
    pub settle: Duration,
}

impl IngressWaitConfig {
    /// Builds the record from resolved CLI arguments
    pub fn new(name: String, timeout_secs: u64, namespace: String, settle_secs: u64) -> Self {
        Self {
            namespace,
            name,
            timeout: Duration::from_secs(timeout_secs),
            interval: INGRESS_INTERVAL,
            settle: Duration::from_secs(settle_secs),
        }
    }
}

/// One virtual-host endpoint and the literal body it must echo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    pub host: String,
    pub expected_body: String,
}

impl FromStr for EndpointTarget {
    type Err = String;

    /// Parses `host=expected_body` (the body may itself contain `=`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, expected_body) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <host>=<body>, got {s:?}"))?;
        if host.is_empty() {
            return Err(format!("empty host in {s:?}"));
        }
        Ok(Self {
            host: host.to_string(),
            expected_body: expected_body.to_string(),
        })
    }
}

/// Configuration for one health-check run across several endpoints
#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub base_url: String,
    pub targets: Vec<EndpointTarget>,
    pub retries: u32,
    pub delay: Duration,
}

impl HealthConfig {
    /// Builds the record from resolved CLI arguments
    pub fn new(base_url: String, targets: Vec<EndpointTarget>, retries: u32, delay_secs: u64) -> Self {
        Self {
            base_url,
            targets,
            retries,
            delay: Duration::from_secs(delay_secs),
        }
    }

    /// The retry count/delay pair expressed as a poll deadline:
    /// timeout = retries * delay, interval = delay.
    pub fn poll_timeout(&self) -> Duration {
        self.delay * self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_defaults_match_observed_contract() {
        let config = DeploymentWaitConfig::new(
            DEFAULT_NAMESPACE.to_string(),
            "demo-echo".to_string(),
            DEFAULT_DEPLOY_TIMEOUT_SECS,
        );
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.interval, Duration::from_secs(5));
    }

    #[test]
    fn ingress_defaults_match_observed_contract() {
        let config = IngressWaitConfig::new(
            "demo-echo".to_string(),
            DEFAULT_INGRESS_TIMEOUT_SECS,
            DEFAULT_NAMESPACE.to_string(),
            DEFAULT_SETTLE_SECS,
        );
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.interval, Duration::from_secs(3));
        assert_eq!(config.settle, Duration::from_secs(10));
    }

    #[test]
    fn health_retries_map_onto_poll_timeout() {
        let config = HealthConfig::new(
            "http://127.0.0.1:8080".to_string(),
            vec![],
            DEFAULT_HEALTH_RETRIES,
            DEFAULT_HEALTH_DELAY_SECS,
        );
        assert_eq!(config.poll_timeout(), Duration::from_secs(60));
        assert_eq!(config.delay, Duration::from_secs(3));
    }

    #[test]
    fn endpoint_target_parses_host_and_body() {
        let target: EndpointTarget = "foo.example.com=foo".parse().unwrap();
        assert_eq!(target.host, "foo.example.com");
        assert_eq!(target.expected_body, "foo");
    }

    #[test]
    fn endpoint_target_body_may_contain_equals() {
        let target: EndpointTarget = "foo.example.com=a=b".parse().unwrap();
        assert_eq!(target.expected_body, "a=b");
    }

    #[test]
    fn endpoint_target_rejects_missing_separator() {
        assert!("foo.example.com".parse::<EndpointTarget>().is_err());
        assert!("=foo".parse::<EndpointTarget>().is_err());
    }
}
