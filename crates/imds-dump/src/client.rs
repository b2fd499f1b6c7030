//! Async HTTP client wrapping reqwest.
//!
//! Plain GETs only: no retries, no custom headers beyond the user agent.

use std::time::Duration;

/// Per-request timeout used by [`HttpClient::new`]. The CLI does not expose it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client used to talk to the metadata service.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Build a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("imds-dump/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET and read the whole body as text.
    ///
    /// Non-success statuses are returned as a normal response; only
    /// transport and body-decoding failures are errors.
    pub async fn get(&self, url: &str) -> reqwest::Result<HttpResponse> {
        let r = self.client.get(url).send().await?;
        let status = r.status().as_u16();
        let body = r.text().await?;

        tracing::debug!(url, status, bytes = body.len(), "GET");

        Ok(HttpResponse {
            status,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
