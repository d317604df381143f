//! Asynchronous HTTP client.
//!
//! # Design
//! `HttpClient` is the seam between the card service and the network: one
//! generic `fetch` that performs a `GET` and decodes the body into any
//! `DeserializeOwned` type, resolving to exactly one classified result.
//! `ReqwestClient` is the production implementation. It keeps no state
//! between calls besides reqwest's connection pool, never retries, and runs
//! on whatever Tokio runtime polls it.

use std::future::Future;

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use url::Url;

use crate::classify;
use crate::config::ClientConfig;
use crate::error::HttpClientError;
use crate::http::{HttpResponse, TransportFailure};

/// Performs a `GET` and decodes the JSON body.
pub trait HttpClient {
    fn fetch<T>(&self, url: &str) -> impl Future<Output = Result<T, HttpClientError>> + Send
    where
        T: DeserializeOwned + Send;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a client honoring the configured timeout.
    pub fn from_config(config: &ClientConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::ClientBuilder::new();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(&self, url: Url) -> Result<HttpResponse, TransportFailure> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| classify_reqwest(&error))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        let body = match response.text().await {
            Ok(body) => body,
            // The status alone classifies a failed response
            Err(error) if !(200..300).contains(&status) => {
                log::debug!("discarding unreadable body of {status} response: {error}");
                String::new()
            }
            Err(error) => return Err(classify_reqwest(&error)),
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn fetch<T>(&self, url: &str) -> impl Future<Output = Result<T, HttpClientError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        let parsed = Url::parse(url)
            .map_err(|error| HttpClientError::InvalidUrl(format!("{url}: {error}")));

        async move {
            let url = parsed.inspect_err(|error| log::warn!("{error}"))?;

            log::info!("GET {url}");

            let result = match self.execute(url.clone()).await {
                Ok(response) => classify::decode(response),
                Err(failure) => {
                    log::warn!("GET {url}: {failure:?}");
                    Err(classify::transport_error(&failure))
                }
            };

            if let Err(error) = &result {
                log::warn!("GET {url} failed: {error}");
            }

            result
        }
    }
}

fn classify_reqwest(error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        return TransportFailure::Other(error.to_string());
    }

    classify::classify_transport(error)
}
