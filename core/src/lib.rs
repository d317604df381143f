//! Networking core for the trading-card browser.
//!
//! # Overview
//! Fetches cards from the `api.magicthegathering.io` HTTP API, either the
//! full list or filtered by name, and classifies every failure into a small
//! taxonomy the UI can present and retry.
//!
//! # Design
//! - `CardsService` builds endpoint URLs and delegates to an `HttpClient`;
//!   `ReqwestClient` is the bundled asynchronous implementation.
//! - Classification and decoding are pure functions over plain-data
//!   `HttpResponse` / `TransportFailure` values, so a host that performs
//!   its own I/O (see `mtg-ffi`) gets exactly the same results.
//! - Nothing is cached and nothing is retried; calls are independent and may
//!   run concurrently. `LatestSearch` adds opt-in last-request-wins ordering.

pub mod classify;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod search;
pub mod service;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use error::{HttpClientError, ServerError};
pub use http::{HostIo, HttpRequest, HttpResponse, TransportFailure};
pub use search::LatestSearch;
pub use service::CardsService;
pub use transport::{HttpClient, ReqwestClient};
pub use types::{Card, CardCollection};
