//! HTTP transport seam.
//!
//! The fetcher only needs "GET this URL with these headers, give me status
//! and body". Keeping that behind a trait lets tests script responses
//! without a network.

use std::error::Error as StdError;
use std::time::Duration;

use super::FetchError;

/// A completed HTTP exchange. Non-2xx statuses are still `Ok` at this layer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that happen before an HTTP status is available.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Certificate validation failed, usually because no trust store is installed
    #[error("certificate verification failed: {0}")]
    TrustStore(String),

    /// Connection, DNS, timeout or body read failure
    #[error("{0}")]
    Network(String),
}

/// Blocking HTTP GET.
pub trait HttpTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by `reqwest::blocking`.
pub struct ReqwestTransport {
    http_client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let mut request = self.http_client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(classify)?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Split certificate problems from everything else. reqwest buries the TLS
/// cause a few levels down the source chain.
fn classify(error: reqwest::Error) -> TransportError {
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }

    let detail = messages.join(": ");
    if is_trust_store_failure(&detail) {
        TransportError::TrustStore(detail)
    } else {
        TransportError::Network(detail)
    }
}

fn is_trust_store_failure(detail: &str) -> bool {
    let detail = detail.to_ascii_lowercase();
    ["certificate verify failed", "invalid peer certificate", "unknownissuer", "no root certificates"]
        .iter()
        .any(|needle| detail.contains(needle))
}
