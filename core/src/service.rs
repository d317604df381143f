//! Card service: endpoint selection on top of an `HttpClient`.
//!
//! # Design
//! `CardsService` holds only a transport and a base URL and carries no
//! mutable state between calls: no caching, no deduplication, no retries.
//! Each fetch builds a fresh URL and delegates to `HttpClient::fetch`,
//! returning its classified result unchanged.
//!
//! The same URL building is exposed as plain-data `build_*` / `parse_*`
//! methods so a host that performs its own I/O (see `mtg-ffi`) gets identical
//! requests and identical classification.

use url::Url;

use crate::classify;
use crate::config::ClientConfig;
use crate::endpoint::{self, DEFAULT_BASE_URL};
use crate::error::HttpClientError;
use crate::http::{HttpRequest, HttpResponse, TransportFailure};
use crate::transport::{HttpClient, ReqwestClient};
use crate::types::CardCollection;

#[derive(Debug, Clone)]
pub struct CardsService<C = ReqwestClient> {
    client: C,
    base_url: Url,
}

impl<C> CardsService<C> {
    /// A service for the public cards API.
    pub fn new(client: C) -> Self {
        Self {
            client,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }

    /// A service for another deployment of the API, e.g. a local mock.
    pub fn with_base_url(client: C, base_url: &str) -> Result<Self, HttpClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| HttpClientError::InvalidUrl(format!("{base_url}: {error}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(HttpClientError::InvalidUrl(format!(
                "{base_url}: unsupported scheme"
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn from_config(client: C, config: &ClientConfig) -> Result<Self, HttpClientError> {
        Self::with_base_url(client, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The URL fetched for `name`; `None` or `""` select the unfiltered list.
    pub fn cards_url(&self, name: Option<&str>) -> Url {
        endpoint::cards_url(&self.base_url, name)
    }

    pub fn build_get_cards(&self) -> HttpRequest {
        self.build_request(None)
    }

    pub fn build_get_cards_by_name(&self, name: &str) -> HttpRequest {
        self.build_request(Some(name))
    }

    pub fn parse_cards(&self, response: HttpResponse) -> Result<CardCollection, HttpClientError> {
        classify::decode(response)
    }

    /// Classify a request that produced no response.
    pub fn transport_error(&self, failure: &TransportFailure) -> HttpClientError {
        classify::transport_error(failure)
    }

    fn build_request(&self, name: Option<&str>) -> HttpRequest {
        HttpRequest {
            url: self.cards_url(name).into(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

impl<C: HttpClient> CardsService<C> {
    /// Fetch the unfiltered card list.
    pub async fn get_cards(&self) -> Result<CardCollection, HttpClientError> {
        self.client.fetch(self.cards_url(None).as_str()).await
    }

    /// Fetch the cards the server matches against `name`.
    ///
    /// An empty `name` behaves exactly like [`CardsService::get_cards`].
    pub async fn get_cards_by_name(&self, name: &str) -> Result<CardCollection, HttpClientError> {
        self.client.fetch(self.cards_url(Some(name)).as_str()).await
    }
}

impl Default for CardsService<ReqwestClient> {
    fn default() -> Self {
        Self::new(ReqwestClient::new())
    }
}
