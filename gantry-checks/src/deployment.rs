//! Deployment readiness check
//!
//! Ready iff the deployment's ready replica count matches its desired count
//! and the desired count is greater than zero.

use gantry_core::PollOutcome;
use serde::Deserialize;

use crate::error::Result;
use crate::kubectl::Kubectl;

/// The two replica counters the readiness decision needs.
///
/// Parsed out of the full deployment object; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaStatus {
    pub desired: i64,
    pub ready: i64,
}

#[derive(Debug, Deserialize, Default)]
struct Deployment {
    #[serde(default)]
    spec: DeploymentSpec,
    #[serde(default)]
    status: DeploymentStatus,
}

#[derive(Debug, Deserialize, Default)]
struct DeploymentSpec {
    replicas: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DeploymentStatus {
    ready_replicas: Option<i64>,
}

/// Parses the replica counters from a `kubectl get deployment -o json` value.
pub fn parse_replica_status(value: &serde_json::Value) -> Result<ReplicaStatus> {
    let deployment: Deployment = serde_json::from_value(value.clone())?;
    Ok(ReplicaStatus {
        desired: deployment.spec.replicas.unwrap_or(0),
        ready: deployment.status.ready_replicas.unwrap_or(0),
    })
}

/// Maps observed replica counters to a poll outcome.
pub fn readiness_outcome(status: ReplicaStatus) -> PollOutcome {
    if status.desired > 0 && status.ready == status.desired {
        PollOutcome::Ready
    } else {
        PollOutcome::NotReady(format!(
            "{}/{} replicas ready",
            status.ready, status.desired
        ))
    }
}

/// Poll check for a named deployment in a namespace
#[derive(Debug, Clone)]
pub struct DeploymentCheck {
    kubectl: Kubectl,
    namespace: String,
    name: String,
}

impl DeploymentCheck {
    /// Creates a check for `name` in `namespace`
    pub fn new(kubectl: Kubectl, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kubectl,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Queries the cluster once and reports the outcome.
    ///
    /// An absent deployment is a not-ready condition (rollouts may create it
    /// late); a kubectl failure is a transient error absorbed by the poller.
    pub async fn check(&self) -> PollOutcome {
        match self
            .kubectl
            .get_json(&self.namespace, "deployment", &self.name)
            .await
        {
            Ok(Some(value)) => match parse_replica_status(&value) {
                Ok(status) => readiness_outcome(status),
                Err(e) => PollOutcome::error(e),
            },
            Ok(None) => PollOutcome::NotReady(format!(
                "deployment {}/{} not found",
                self.namespace, self.name
            )),
            Err(e) => PollOutcome::error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment_json(desired: i64, ready: Option<i64>) -> serde_json::Value {
        let mut status = serde_json::json!({ "replicas": desired });
        if let Some(ready) = ready {
            status["readyReplicas"] = serde_json::json!(ready);
        }
        serde_json::json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "demo-echo", "namespace": "default" },
            "spec": { "replicas": desired },
            "status": status,
        })
    }

    #[test]
    fn all_replicas_ready_is_ready() {
        let status = parse_replica_status(&deployment_json(3, Some(3))).unwrap();
        assert_eq!(status, ReplicaStatus { desired: 3, ready: 3 });
        assert_eq!(readiness_outcome(status), PollOutcome::Ready);
    }

    #[test]
    fn missing_ready_replicas_counts_as_zero() {
        // Fresh deployments omit status.readyReplicas entirely.
        let status = parse_replica_status(&deployment_json(3, None)).unwrap();
        assert_eq!(status, ReplicaStatus { desired: 3, ready: 0 });
        assert_eq!(
            readiness_outcome(status),
            PollOutcome::NotReady("0/3 replicas ready".to_string())
        );
    }

    #[test]
    fn partially_ready_is_not_ready_with_counts_in_reason() {
        let status = ReplicaStatus { desired: 3, ready: 1 };
        assert_eq!(
            readiness_outcome(status),
            PollOutcome::NotReady("1/3 replicas ready".to_string())
        );
    }

    #[test]
    fn zero_desired_replicas_is_never_ready() {
        // 0 == 0 must not count as ready; a scaled-to-zero deployment serves
        // no traffic.
        let status = ReplicaStatus { desired: 0, ready: 0 };
        assert_eq!(
            readiness_outcome(status),
            PollOutcome::NotReady("0/0 replicas ready".to_string())
        );
    }
}
