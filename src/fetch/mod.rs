//! Rate-limit aware HTTP retrieval.
//!
//! The catalog answers 403/429 when it thinks we're hammering it. Those are
//! not failures: we sleep through the cooldown and send the same request
//! again. Everything else that goes wrong is reported to the caller.
//!
//! Two entry points:
//! - [`RateLimitAwareFetcher::fetch`] returns bytes or a [`FetchError`]
//! - [`RateLimitAwareFetcher::fetch_text`] never fails; it logs and returns `""`

mod policy;
mod transport;

pub use policy::{Sleeper, ThreadSleeper, ThrottlePolicy};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

use crate::config::Config;

/// Errors surfaced by [`RateLimitAwareFetcher::fetch`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no trusted certificates for {url}: {message}")]
    TrustStore { url: String, message: String },

    #[error("network error reading {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("still throttled by {host} after {retries} retries")]
    Throttled { host: String, retries: u32 },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    fn from_transport(url: &str, error: TransportError) -> Self {
        match error {
            TransportError::TrustStore(message) => Self::TrustStore {
                url: url.to_string(),
                message,
            },
            TransportError::Network(message) => Self::Network {
                url: url.to_string(),
                message,
            },
        }
    }
}

/// HTTP GET with a fixed user agent and cooldown-and-retry on throttling.
pub struct RateLimitAwareFetcher<T = ReqwestTransport, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    policy: ThrottlePolicy,
    user_agent: String,
}

impl RateLimitAwareFetcher {
    /// Build the production fetcher from configuration.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config.http.timeout())?;
        Ok(Self::new(
            transport,
            ThreadSleeper,
            config.throttle.policy(),
            config.http.user_agent.clone(),
        ))
    }
}

impl<T: HttpTransport, S: Sleeper> RateLimitAwareFetcher<T, S> {
    pub fn new(transport: T, sleeper: S, policy: ThrottlePolicy, user_agent: impl Into<String>) -> Self {
        Self {
            transport,
            sleeper,
            policy,
            user_agent: user_agent.into(),
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// GET `url`, retrying through throttling cooldowns.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let headers = [("User-Agent", self.user_agent.as_str())];
        let mut retries = 0;

        loop {
            let response = self
                .transport
                .get(url, &headers)
                .map_err(|e| FetchError::from_transport(url, e))?;

            if response.is_success() {
                return Ok(response.body);
            }

            if !self.policy.is_throttled(response.status) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: response.status,
                });
            }

            let host = host_of(url);
            if !self.policy.allows_retry(retries) {
                return Err(FetchError::Throttled { host, retries });
            }

            tracing::warn!(
                host = %host,
                status = response.status,
                "Request limit exceeded from {}, trying again in {} minutes",
                host,
                self.policy.cooldown.as_secs() / 60
            );
            self.sleeper.sleep(self.policy.cooldown);
            retries += 1;
        }
    }

    /// GET `url` as UTF-8 text. Failures are logged and yield an empty string.
    pub fn fetch_text(&self, url: &str) -> String {
        let bytes = match self.fetch(url) {
            Ok(bytes) => bytes,
            Err(FetchError::TrustStore { message, .. }) => {
                tracing::error!("No trusted root certificates available, can't access {}", url);
                tracing::error!(
                    "Install your system's CA certificate bundle (e.g. the `ca-certificates` package) and try again"
                );
                tracing::debug!("TLS failure detail: {}", message);
                return String::new();
            }
            Err(e) => {
                tracing::error!("Error reading URL ({}): {}", url, e);
                return String::new();
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error reading URL ({}): response is not UTF-8: {}", url, e);
                String::new()
            }
        }
    }
}

/// Host portion of a URL for diagnostics; falls back to the whole URL.
fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
