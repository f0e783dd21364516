//! Ingress readiness check
//!
//! Ready iff the ingress exists and carries at least one routing rule. The
//! call site is expected to follow a successful wait with a settle step,
//! since rule propagation to the routing layer is asynchronous.

use gantry_core::PollOutcome;
use serde::Deserialize;

use crate::error::Result;
use crate::kubectl::Kubectl;

#[derive(Debug, Deserialize, Default)]
struct Ingress {
    #[serde(default)]
    spec: IngressSpec,
}

#[derive(Debug, Deserialize, Default)]
struct IngressSpec {
    rules: Option<Vec<serde_json::Value>>,
}

/// Parses the routing rule count from a `kubectl get ingress -o json` value.
pub fn parse_rule_count(value: &serde_json::Value) -> Result<usize> {
    let ingress: Ingress = serde_json::from_value(value.clone())?;
    Ok(ingress.spec.rules.map_or(0, |rules| rules.len()))
}

/// Maps an observed rule count to a poll outcome.
pub fn rule_count_outcome(rule_count: usize) -> PollOutcome {
    if rule_count > 0 {
        PollOutcome::Ready
    } else {
        PollOutcome::NotReady("0 routing rules configured".to_string())
    }
}

/// Poll check for a named ingress in a namespace
#[derive(Debug, Clone)]
pub struct IngressCheck {
    kubectl: Kubectl,
    namespace: String,
    name: String,
}

impl IngressCheck {
    /// Creates a check for `name` in `namespace`
    pub fn new(kubectl: Kubectl, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kubectl,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Queries the cluster once and reports the outcome.
    pub async fn check(&self) -> PollOutcome {
        match self
            .kubectl
            .get_json(&self.namespace, "ingress", &self.name)
            .await
        {
            Ok(Some(value)) => match parse_rule_count(&value) {
                Ok(count) => rule_count_outcome(count),
                Err(e) => PollOutcome::error(e),
            },
            Ok(None) => PollOutcome::NotReady(format!(
                "ingress {}/{} not found",
                self.namespace, self.name
            )),
            Err(e) => PollOutcome::error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use gantry_core::{PollSpec, poll_until_ready};

    use super::*;

    fn ingress_json(rules: usize) -> serde_json::Value {
        let rules: Vec<_> = (0..rules)
            .map(|i| serde_json::json!({ "host": format!("echo-{i}.example.com") }))
            .collect();
        serde_json::json!({
            "apiVersion": "networking.k8s.io/v1",
            "kind": "Ingress",
            "metadata": { "name": "demo-echo", "namespace": "default" },
            "spec": { "rules": rules },
        })
    }

    #[test]
    fn configured_rules_are_ready() {
        let count = parse_rule_count(&ingress_json(2)).unwrap();
        assert_eq!(count, 2);
        assert_eq!(rule_count_outcome(count), PollOutcome::Ready);
    }

    #[test]
    fn empty_rule_list_is_not_ready() {
        let count = parse_rule_count(&ingress_json(0)).unwrap();
        assert_eq!(
            rule_count_outcome(count),
            PollOutcome::NotReady("0 routing rules configured".to_string())
        );
    }

    #[test]
    fn missing_rules_field_counts_as_zero() {
        let value = serde_json::json!({ "spec": {} });
        assert_eq!(parse_rule_count(&value).unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_succeeds_once_rules_appear() {
        // Rule count stays 0 for four checks, then two rules show up.
        let calls = AtomicUsize::new(0);
        let spec = PollSpec::new(
            "ingress default/demo-echo",
            Duration::from_secs(20),
            Duration::from_secs(3),
        );

        let result = poll_until_ready(&spec, || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                let rules = if n <= 4 { 0 } else { 2 };
                rule_count_outcome(rules)
            }
        })
        .await;

        assert!(result.succeeded);
        assert_eq!(result.attempts, 5);
    }
}
