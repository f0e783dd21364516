//! kubectl subprocess wrapper
//!
//! The cluster query boundary: everything the poller needs to observe is
//! fetched by shelling out to `kubectl` and parsing its JSON output. "Not
//! found" is distinguished from other failures so checks can treat an
//! absent resource as a not-ready condition rather than a hard error.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{CheckError, Result};

/// Wrapper around a `kubectl` binary
#[derive(Debug, Clone)]
pub struct Kubectl {
    command: String,
}

impl Kubectl {
    /// Creates a wrapper invoking the given kubectl binary
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Fetches a namespaced resource as JSON.
    ///
    /// Returns `Ok(None)` when the resource does not exist, `Err` for any
    /// other kubectl failure.
    pub async fn get_json(
        &self,
        namespace: &str,
        kind: &str,
        name: &str,
    ) -> Result<Option<serde_json::Value>> {
        let rendered = format!(
            "{} get {} {} -n {} -o json",
            self.command, kind, name, namespace
        );
        debug!("running: {}", rendered);

        let output = Command::new(&self.command)
            .arg("get")
            .arg(kind)
            .arg(name)
            .arg("-n")
            .arg(namespace)
            .arg("-o")
            .arg("json")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| CheckError::exec(&rendered, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            if stderr.contains("NotFound") {
                return Ok(None);
            }
            return Err(CheckError::command_failed(rendered, stderr.trim()));
        }

        let value = serde_json::from_slice(&output.stdout)?;
        Ok(Some(value))
    }

    /// Dumps `kubectl describe` for a resource straight to the terminal.
    ///
    /// Used as a diagnostic after a poll timeout; output is intentionally
    /// not captured.
    pub async fn describe(&self, namespace: &str, kind: &str, name: &str) -> Result<()> {
        let rendered = format!("{} describe {} {} -n {}", self.command, kind, name, namespace);

        let mut command = Command::new(&self.command);
        command
            .arg("describe")
            .arg(kind)
            .arg(name)
            .arg("-n")
            .arg(namespace)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        run_command(command, &rendered).await
    }

    /// Lists pods in a namespace straight to the terminal (diagnostic).
    pub async fn list_pods(&self, namespace: &str) -> Result<()> {
        let rendered = format!("{} get pods -n {} -o wide", self.command, namespace);

        let mut command = Command::new(&self.command);
        command
            .arg("get")
            .arg("pods")
            .arg("-n")
            .arg(namespace)
            .arg("-o")
            .arg("wide")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        run_command(command, &rendered).await
    }
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

async fn run_command(mut command: Command, rendered: &str) -> Result<()> {
    let exit_status = command
        .spawn()
        .map_err(|e| CheckError::exec(rendered, e))?
        .wait()
        .await
        .map_err(|e| CheckError::exec(rendered, e))?;

    if !exit_status.success() {
        return Err(CheckError::command_failed(rendered, "non-zero exit status"));
    }
    Ok(())
}
