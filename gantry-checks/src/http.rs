//! HTTP endpoint health check
//!
//! Issues a GET with a virtual-host routing header and compares the response
//! against an expected literal body. Anything other than a 200 with the
//! exact body is a not-ready condition carrying the observed value, so the
//! poller keeps retrying until the endpoint settles or the deadline passes.

use gantry_core::PollOutcome;
use reqwest::header;

/// Poll check for one HTTP echo endpoint behind virtual-host routing
#[derive(Debug, Clone)]
pub struct EndpointCheck {
    client: reqwest::Client,
    url: String,
    host: String,
    expected_body: String,
}

impl EndpointCheck {
    /// Creates a check that GETs `url` with `Host: <host>` and expects the
    /// response body to equal `expected_body` exactly.
    pub fn new(
        url: impl Into<String>,
        host: impl Into<String>,
        expected_body: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            host: host.into(),
            expected_body: expected_body.into(),
        }
    }

    /// The virtual host this check routes to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Issues one GET and reports the outcome.
    pub async fn check(&self) -> PollOutcome {
        let response = match self
            .client
            .get(&self.url)
            .header(header::HOST, self.host.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return PollOutcome::NotReady(format!("connection failed: {e}")),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return PollOutcome::NotReady(format!("failed to read body: {e}")),
        };

        evaluate_response(status, &body, &self.expected_body)
    }
}

/// Maps an observed status/body pair to a poll outcome.
pub fn evaluate_response(status: u16, body: &str, expected_body: &str) -> PollOutcome {
    if status != 200 {
        return PollOutcome::NotReady(format!("status {status}"));
    }
    if body != expected_body {
        return PollOutcome::NotReady(format!("unexpected body {body:?}"));
    }
    PollOutcome::Ready
}
