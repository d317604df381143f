//! Classification of responses and transport failures into `HttpClientError`.
//!
//! # Design
//! Status handling comes first: any response with a non-2xx status is
//! classified by its status alone, whatever its body says. Only a 2xx body is
//! decoded. Transport failures are classified from the error's source chain,
//! so the rules work for any transport that wraps `std::io::Error` (reqwest
//! via hyper, or the host's own error reporting through FFI).

use std::error::Error;
use std::io;

use serde::de::DeserializeOwned;

use crate::error::HttpClientError;
use crate::http::{HttpResponse, TransportFailure};

/// Map a response status to `Ok(())` for 2xx, or to the matching error.
pub fn check_status(response: &HttpResponse) -> Result<(), HttpClientError> {
    if response.is_success() {
        return Ok(());
    }

    match response.status {
        404 => Err(HttpClientError::WrongUrl),
        // 400..=500 and everything else that is not a success
        _ => Err(HttpClientError::SERVER_FAIL),
    }
}

/// Check the status, then decode the body into `T`.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, HttpClientError> {
    check_status(&response)?;

    if response.body.trim().is_empty() {
        return Err(HttpClientError::NoParsingData);
    }

    serde_json::from_str(&response.body).map_err(|e| {
        log::debug!("failed to decode {} byte body: {e}", response.body.len());
        HttpClientError::ParsingError(e.to_string())
    })
}

/// Map a failure observed by the host to the error surfaced to callers.
pub fn transport_error(failure: &TransportFailure) -> HttpClientError {
    match failure {
        TransportFailure::NotConnected => HttpClientError::NETWORK_PROBLEM,
        TransportFailure::HostNotFound => HttpClientError::WrongUrl,
        TransportFailure::Other(_) => HttpClientError::SERVER_FAIL,
    }
}

/// Resolver messages produced by hyper's `GaiResolver` and the system
/// resolvers it wraps.
const HOST_NOT_FOUND_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname provided",
    "no such host",
];

/// Inspect an error and its sources to decide what kind of transport failure
/// it is.
pub fn classify_transport(error: &(dyn Error + 'static)) -> TransportFailure {
    let mut current = Some(error);

    while let Some(err) = current {
        if let Some(io_error) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_error.kind(),
                io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::NetworkDown
                    | io::ErrorKind::HostUnreachable
            ) {
                return TransportFailure::NotConnected;
            }
        }

        let message = err.to_string().to_lowercase();
        if HOST_NOT_FOUND_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
        {
            return TransportFailure::HostNotFound;
        }

        current = err.source();
    }

    TransportFailure::Other(error.to_string())
}
