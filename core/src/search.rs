//! Last-request-wins searching for search-as-you-type screens.
//!
//! `CardsService` does not order concurrent requests: when a user types
//! quickly, an older search may finish after a newer one. `LatestSearch`
//! tags every search with a ticket and drops the outcome of any search that
//! was overtaken by a newer one before it completed. Requests are not
//! cancelled; only their results are discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::HttpClientError;
use crate::service::CardsService;
use crate::transport::HttpClient;
use crate::types::CardCollection;

#[derive(Debug)]
pub struct LatestSearch<C> {
    service: CardsService<C>,
    latest: AtomicU64,
}

impl<C: HttpClient> LatestSearch<C> {
    pub fn new(service: CardsService<C>) -> Self {
        Self {
            service,
            latest: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &CardsService<C> {
        &self.service
    }

    /// Search by name. Resolves to `Ok(None)` when a newer search was issued
    /// while this one was in flight, whatever its own outcome.
    pub async fn search(&self, name: &str) -> Result<Option<CardCollection>, HttpClientError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.service.get_cards_by_name(name).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            log::debug!("search {ticket} for {name:?} superseded");
            return Ok(None);
        }

        result.map(Some)
    }
}
