//! Blocking HTTP access for index pages and repository probes
//!
//! Every request goes through one `ureq` agent with a global timeout, so a
//! stalled server fails a single lookup instead of hanging the whole run.
//! Non-success status codes are returned as data: the prober needs to tell
//! a 404 apart from a transport failure only for logging, never for control flow.

use std::time::Duration;
use thiserror::Error;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const USER_AGENT: &str = "spmready (https://github.com/StatusQuo/spmready)";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Request to {url} timed out after {}s", timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },
}

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    pub status: u16,
    /// Always present for `HttpFetcher`; a failed body read is a `FetchError`
    pub body: Option<Vec<u8>>,
}

impl HttpResult {
    pub fn new(status: u16, body: Option<Vec<u8>>) -> Self {
        Self { status, body }
    }

    /// Whether the server answered 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, if one was returned and it decodes
    pub fn text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

/// A single blocking GET
pub trait Fetch {
    fn get(&self, url: &str) -> Result<HttpResult, FetchError>;
}

/// `Fetch` backed by a real HTTP client
pub struct HttpFetcher {
    agent: ureq::Agent,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, url: &str, err: ureq::Error) -> FetchError {
        match err {
            ureq::Error::Timeout(_) => FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            },
            ureq::Error::Io(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                }
            }
            ureq::Error::BadUri(reason) => FetchError::MalformedUrl {
                url: url.to_string(),
                reason,
            },
            other => FetchError::Network {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<HttpResult, FetchError> {
        check_url(url)?;
        tracing::debug!(url, "GET");

        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_vec()
            .map_err(|e| self.classify(url, e))?;

        tracing::debug!(url, status, "response");
        Ok(HttpResult {
            status,
            body: Some(body),
        })
    }
}

/// Reject anything that is not an absolute http(s) URL with a host
///
/// Names scraped from manifests end up in request URLs, so this runs before
/// every request rather than trusting the caller.
pub fn check_url(url: &str) -> Result<(), FetchError> {
    let malformed = |reason: &str| FetchError::MalformedUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let uri: ureq::http::Uri = url.parse().map_err(|e: ureq::http::uri::InvalidUri| {
        FetchError::MalformedUrl {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(malformed(&format!("unsupported scheme '{}'", other))),
        None => return Err(malformed("missing scheme")),
    }

    if uri.host().is_none_or(str::is_empty) {
        return Err(malformed("missing host"));
    }

    Ok(())
}
