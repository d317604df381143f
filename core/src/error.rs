//! Error taxonomy for the cards HTTP client.
//!
//! # Design
//! Every failure is classified into exactly one variant before it reaches a
//! caller; raw `reqwest` or `serde_json` errors never escape the client.
//! `WrongUrl` covers both "the resource does not exist" (404) and "the host
//! does not resolve", since the UI treats both as a bad address. Server and
//! connectivity problems are grouped under `ServerError`.

/// Errors returned by `HttpClient::fetch` and the card service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// 404, or the host name could not be resolved.
    #[error("wrong URL: resource not found or host unknown")]
    WrongUrl,

    /// Connectivity or server-side failure.
    #[error(transparent)]
    ServerError(#[from] ServerError),

    /// The server answered 2xx with an empty body.
    #[error("response carried no data")]
    NoParsingData,

    /// The server answered 2xx but the body is not the expected JSON.
    #[error("response could not be parsed: {0}")]
    ParsingError(String),

    /// The URL could not be parsed; no request was sent.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServerError {
    /// The device has no usable network connection.
    #[error("network problem: no connection")]
    NetworkProblem,

    /// Any other 4xx/5xx or unclassified transport failure.
    #[error("server failed to handle the request")]
    ServerFail,
}

impl HttpClientError {
    pub const NETWORK_PROBLEM: Self = Self::ServerError(ServerError::NetworkProblem);
    pub const SERVER_FAIL: Self = Self::ServerError(ServerError::ServerFail);
}
