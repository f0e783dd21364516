//! Gantry Checks
//!
//! Condition checks that drive the gantry poller, covering the two external
//! boundaries of the system:
//!
//! - A `kubectl`-backed cluster query client for deployment replica status,
//!   ingress routing rules, and diagnostic dumps
//! - A reqwest-backed HTTP endpoint checker with virtual-host routing
//!
//! Each check produces a [`gantry_core::PollOutcome`] and never fails
//! outright: expected "not ready" states and transient query errors are both
//! reported through the outcome so the poll loop can absorb them.

pub mod deployment;
pub mod error;
pub mod http;
pub mod ingress;
pub mod kubectl;

pub use deployment::DeploymentCheck;
pub use error::{CheckError, Result};
pub use http::EndpointCheck;
pub use ingress::IngressCheck;
pub use kubectl::Kubectl;
