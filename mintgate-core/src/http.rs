//! Thin wrapper on the HTTP client used for identity provider calls.
//!
//! Sets the defaults every outbound call must carry: an explicit timeout and
//! a versioned user agent. Deliberately no retry middleware — retries are the
//! responsibility of the external scheduler that re-delivers the triggering
//! event, and the verification flow must stay single-shot per invocation.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};

/// Timeout applied to every provider call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client with per-request defaults applied.
pub(crate) struct Request {
    client: reqwest::Client,
    timeout: Duration,
}

impl Request {
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Creates a request builder with defaults applied.
    fn req(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url).timeout(self.timeout).header(
            "User-Agent",
            format!("mintgate-core/{}", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Creates a GET request builder with defaults applied.
    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.req(Method::GET, url)
    }

    /// Creates a POST request builder with defaults applied.
    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.req(Method::POST, url)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
