//! Post-readiness settle step
//!
//! A fixed, non-retried grace period applied by call sites after a
//! readiness signal, to absorb asynchronous propagation in the surrounding
//! infrastructure (e.g. an ingress controller picking up fresh rules).
//! Deliberately kept outside the poll primitive so the two behaviors can be
//! asserted independently.

use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

/// Sleeps for `delay`, once, with a single log line.
pub async fn settle(description: &str, delay: Duration) {
    info!("{}: settling for {:.1?}", description, delay);
    sleep(delay).await;
}
