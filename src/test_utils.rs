//! Test utilities and fixtures for cover-finder tests.
//!
//! Provides a scriptable HTTP transport, a sleeper that records instead of
//! blocking, and builders for catalog responses.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .route("/search?", MockReply::ok(&search_response(&[("Blur", "Parklife", ART)])))
//!     .route("500x500", MockReply::ok("image bytes"));
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::fetch::{HttpResponse, HttpTransport, Sleeper, TransportError};
use crate::model::TrackMetadata;

/// A canned transport outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(HttpResponse),
    Error(TransportError),
}

impl MockReply {
    /// 200 with the given body.
    pub fn ok(body: impl AsRef<[u8]>) -> Self {
        Self::bytes(body.as_ref().to_vec())
    }

    /// 200 with raw bytes.
    pub fn bytes(body: Vec<u8>) -> Self {
        Self::Response(HttpResponse { status: 200, body })
    }

    /// Empty body with the given status.
    pub fn status(status: u16) -> Self {
        Self::Response(HttpResponse {
            status,
            body: Vec::new(),
        })
    }

    pub fn network_error(message: &str) -> Self {
        Self::Error(TransportError::Network(message.to_string()))
    }

    pub fn trust_store_error(message: &str) -> Self {
        Self::Error(TransportError::TrustStore(message.to_string()))
    }
}

/// What the transport was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub user_agent: Option<String>,
}

struct Route {
    pattern: String,
    replies: VecDeque<MockReply>,
}

/// Transport that answers from routes matched by URL substring.
///
/// Routes are checked in insertion order. Each route plays its replies in
/// sequence and keeps repeating the last one. Unrouted URLs fail with a
/// network error.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every URL containing `pattern` with `reply`.
    pub fn route(self, pattern: &str, reply: MockReply) -> Self {
        self.route_sequence(pattern, vec![reply])
    }

    /// Answer URLs containing `pattern` with `replies`, one per request.
    pub fn route_sequence(self, pattern: &str, replies: Vec<MockReply>) -> Self {
        self.routes.borrow_mut().push(Route {
            pattern: pattern.to_string(),
            replies: replies.into(),
        });
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// URLs requested so far, in order.
    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let user_agent = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.to_string());
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            user_agent,
        });

        let mut routes = self.routes.borrow_mut();
        let Some(route) = routes.iter_mut().find(|r| url.contains(&r.pattern)) else {
            return Err(TransportError::Network(format!("no mock route for {url}")));
        };

        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(TransportError::Network(format!("mock route for {url} has no replies"))),
        }
    }
}

/// Sleeper that records requested durations and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// In-memory log sink shared between a test and its subscriber.
#[derive(Debug, Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with everything logged at debug level or above.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

/// Build a search response body from `(artist, album, artworkUrl100)` triples.
pub fn search_response(entries: &[(&str, &str, &str)]) -> String {
    let results: Vec<serde_json::Value> = entries
        .iter()
        .map(|(artist, album, artwork)| {
            serde_json::json!({
                "wrapperType": "collection",
                "collectionType": "Album",
                "artistName": artist,
                "collectionName": album,
                "artworkUrl60": artwork.replace("100x100", "60x60"),
                "artworkUrl100": artwork,
            })
        })
        .collect();

    serde_json::json!({
        "resultCount": results.len(),
        "results": results,
    })
    .to_string()
}

/// An empty search response.
pub fn empty_search_response() -> String {
    search_response(&[])
}

/// Creates TrackMetadata with sensible defaults.
pub fn mock_track_metadata() -> TrackMetadata {
    TrackMetadata::new("Test Artist", "Test Album")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_logs_collects_events() {
        let (value, logs) = capture_logs(|| {
            tracing::warn!("cooling down");
            7
        });
        assert_eq!(value, 7);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("cooling down"));
    }

    #[test]
    fn test_route_sequence_repeats_last_reply() {
        let transport = MockTransport::new().route_sequence(
            "example",
            vec![MockReply::status(429), MockReply::ok("done")],
        );

        assert_eq!(transport.get("https://example.com", &[]).unwrap().status, 429);
        assert_eq!(transport.get("https://example.com", &[]).unwrap().status, 200);
        assert_eq!(transport.get("https://example.com", &[]).unwrap().status, 200);
        assert_eq!(transport.urls().len(), 3);
    }

    #[test]
    fn test_unrouted_url_fails() {
        let transport = MockTransport::new();
        assert!(transport.get("https://nowhere.test", &[]).is_err());
    }

    #[test]
    fn test_search_response_shape() {
        let body = search_response(&[("Blur", "Parklife", "https://a/100x100bb.jpg")]);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["resultCount"], 1);
        assert_eq!(value["results"][0]["artistName"], "Blur");
        assert_eq!(empty_search_response(), r#"{"resultCount":0,"results":[]}"#);
    }

    #[test]
    fn test_mock_track_metadata_defaults() {
        let meta = mock_track_metadata();
        assert_eq!(meta.artist, "Test Artist");
        assert_eq!(meta.album, "Test Album");
    }
}
