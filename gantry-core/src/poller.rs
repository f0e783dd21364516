//! Poll-until-ready primitive
//!
//! Executes a user-supplied condition check on a fixed cadence until the
//! condition holds or a deadline passes, sleeping between attempts. The
//! loop never fails: a timeout is reported as a normal result and the call
//! site decides what to do with it.

use std::future::Future;

use tokio::time::{Instant, sleep};
use tracing::{info, warn};

use crate::domain::poll::{PollOutcome, PollResult, PollSpec};

/// Runs `check` until it reports [`PollOutcome::Ready`] or `spec.timeout`
/// elapses.
///
/// At least one attempt is always made, even when the timeout is shorter
/// than the interval. A transient [`PollOutcome::Error`] is treated exactly
/// like `NotReady`: logged and retried until the deadline. The sleep happens
/// after each unsuccessful attempt, so the elapsed time of a failed result
/// may overshoot the timeout by at most one interval.
///
/// # Arguments
/// * `spec` - Description, timeout, and polling interval for this run
/// * `check` - Condition check; may perform network I/O and must report
///   expected "not ready" states via its outcome instead of failing
pub async fn poll_until_ready<F, Fut>(spec: &PollSpec, mut check: F) -> PollResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PollOutcome>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;
    let mut last_reason: Option<String> = None;

    loop {
        attempts += 1;

        match check().await {
            PollOutcome::Ready => {
                info!(
                    "{}: ready after {:.1?} ({} attempt(s))",
                    spec.description,
                    start.elapsed(),
                    attempts
                );
                return PollResult {
                    succeeded: true,
                    elapsed: start.elapsed(),
                    attempts,
                    last_reason: None,
                };
            }
            PollOutcome::NotReady(reason) => {
                info!(
                    "{}: not ready ({:.1?}/{:.1?}, attempt {}): {}",
                    spec.description,
                    start.elapsed(),
                    spec.timeout,
                    attempts,
                    reason
                );
                last_reason = Some(reason);
            }
            PollOutcome::Error(cause) => {
                warn!(
                    "{}: check failed ({:.1?}/{:.1?}, attempt {}), retrying: {}",
                    spec.description,
                    start.elapsed(),
                    spec.timeout,
                    attempts,
                    cause
                );
                last_reason = Some(cause);
            }
        }

        // The deadline is tested on both sides of the sleep: a failed result
        // is only returned once elapsed has actually reached the timeout,
        // and no attempt starts after the deadline has passed.
        if start.elapsed() >= spec.timeout {
            break;
        }
        sleep(spec.interval).await;
        if start.elapsed() >= spec.timeout {
            break;
        }
    }

    warn!(
        "{}: timed out after {:.1?} ({} attempt(s))",
        spec.description,
        start.elapsed(),
        attempts
    );

    PollResult {
        succeeded: false,
        elapsed: start.elapsed(),
        attempts,
        last_reason,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;

    fn spec(timeout_secs: u64, interval_secs: u64) -> PollSpec {
        PollSpec::new(
            "test condition",
            Duration::from_secs(timeout_secs),
            Duration::from_secs(interval_secs),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn ready_on_first_attempt() {
        let result = poll_until_ready(&spec(60, 5), || async { PollOutcome::Ready }).await;

        assert!(result.succeeded);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.last_reason, None);
        assert!(result.elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ready_on_third_attempt_counts_attempts() {
        // Deployment comes up after two unsuccessful checks.
        let calls = AtomicU32::new(0);
        let result = poll_until_ready(&spec(30, 3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n >= 3 {
                    PollOutcome::Ready
                } else {
                    PollOutcome::NotReady("0/3 replicas ready".to_string())
                }
            }
        })
        .await;

        assert!(result.succeeded);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.last_reason, None);
        assert_eq!(result.elapsed, Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn never_ready_times_out() {
        // Deployment never converges: desired=3, ready=0 throughout.
        let result = poll_until_ready(&spec(10, 3), || async {
            PollOutcome::NotReady("0/3 replicas ready".to_string())
        })
        .await;

        assert!(!result.succeeded);
        assert!((3..=4).contains(&result.attempts), "got {}", result.attempts);
        assert!(result.elapsed >= Duration::from_secs(10));
        assert!(result.elapsed <= Duration::from_secs(13));
        assert_eq!(result.last_reason.as_deref(), Some("0/3 replicas ready"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_result_reports_elapsed_at_or_past_timeout() {
        let result = poll_until_ready(&spec(9, 3), || async {
            PollOutcome::NotReady("waiting".to_string())
        })
        .await;

        assert!(!result.succeeded);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.elapsed, Duration::from_secs(9));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_shorter_than_interval_still_checks_once() {
        let calls = AtomicU32::new(0);
        let result = poll_until_ready(&spec(1, 5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { PollOutcome::NotReady("nope".to_string()) }
        })
        .await;

        assert!(!result.succeeded);
        assert_eq!(result.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_error_is_absorbed_like_not_ready() {
        // First call hits a transient failure, second succeeds; the loop
        // must not abort early.
        let calls = AtomicU32::new(0);
        let result = poll_until_ready(&spec(30, 3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 1 {
                    PollOutcome::error("connection refused")
                } else {
                    PollOutcome::Ready
                }
            }
        })
        .await;

        assert!(result.succeeded);
        assert_eq!(result.attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_error_surfaces_as_timeout() {
        let result = poll_until_ready(&spec(6, 3), || async {
            PollOutcome::error("connection refused")
        })
        .await;

        assert!(!result.succeeded);
        assert!(result.attempts >= 1);
        assert_eq!(result.last_reason.as_deref(), Some("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn deterministic_check_yields_identical_success() {
        async fn run_once() -> PollResult {
            let spec = spec(5, 2);
            poll_until_ready(&spec, || async { PollOutcome::Ready }).await
        }

        let first = run_once().await;
        let second = run_once().await;

        assert_eq!(first.succeeded, second.succeeded);
        assert_eq!(first.attempts, second.attempts);
    }
}
