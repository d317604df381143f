//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `CardsService::build_*` produces an
//! `HttpRequest`; whoever executes it (the bundled `ReqwestClient`, or a
//! mobile host across the FFI boundary) hands back either an `HttpResponse`
//! or a `TransportFailure` describing why no response arrived. All fields
//! are owned so values can cross FFI boundaries without lifetime concerns.
//!
//! Only `GET` exists: the cards API is read-only.

/// A `GET` request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request produced no response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// No usable network (offline, network down or unreachable).
    NotConnected,
    /// The host name did not resolve.
    HostNotFound,
    /// Anything else: refused, reset, timed out, TLS, ...
    Other(String),
}

/// Transport marker for a `CardsService` whose requests are executed by the
/// host: only the `build_*` / `parse_*` half of the service is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostIo;
