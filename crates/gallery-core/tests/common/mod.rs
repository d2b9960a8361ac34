//! In-memory artwork source for table tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use gallery_core::{Artwork, ArtworkId, ArtworkPage, ArtworkSource, FetchError, PageRequest};

/// Serves ids `1..=total` in ascending order and records every request.
pub struct FakeSource {
    total: u64,
    failing_pages: BTreeSet<usize>,
    fail_ids: bool,
    pub page_requests: RefCell<Vec<PageRequest>>,
    pub id_requests: RefCell<Vec<usize>>,
}

impl FakeSource {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            failing_pages: BTreeSet::new(),
            fail_ids: false,
            page_requests: RefCell::new(Vec::new()),
            id_requests: RefCell::new(Vec::new()),
        }
    }

    /// Makes requests for the given one-based page fail with a network error.
    pub fn failing_page(mut self, api_page: usize) -> Self {
        self.failing_pages.insert(api_page);
        self
    }

    pub fn failing_ids(mut self) -> Self {
        self.fail_ids = true;
        self
    }

    pub fn page_request_count(&self) -> usize {
        self.page_requests.borrow().len()
    }

    pub fn id_request_count(&self) -> usize {
        self.id_requests.borrow().len()
    }

    fn ids_from(&self, offset: u64, limit: u64) -> impl Iterator<Item = u64> {
        let end = (offset + limit).min(self.total);
        (offset + 1)..=end
    }
}

impl ArtworkSource for FakeSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<ArtworkPage, FetchError> {
        self.page_requests.borrow_mut().push(request);
        if self.failing_pages.contains(&request.page) {
            return Err(FetchError::Network("connection reset".to_string()));
        }
        let offset = ((request.page - 1) * request.limit) as u64;
        let records = self
            .ids_from(offset, request.limit as u64)
            .map(artwork)
            .collect();
        Ok(ArtworkPage::new(records, self.total))
    }

    async fn fetch_top_ids(&self, count: NonZeroUsize) -> Result<Vec<ArtworkId>, FetchError> {
        self.id_requests.borrow_mut().push(count.get());
        if self.fail_ids {
            return Err(FetchError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(self
            .ids_from(0, count.get() as u64)
            .map(ArtworkId::new)
            .collect())
    }
}

pub fn artwork(id: u64) -> Artwork {
    let mut artwork = Artwork::new(id, format!("Artwork {id}"));
    artwork.artist_display = "Unknown".to_string();
    artwork.date_start = 1900;
    artwork.date_end = 1901;
    artwork
}

pub fn ids(values: impl IntoIterator<Item = u64>) -> Vec<ArtworkId> {
    values.into_iter().map(ArtworkId::new).collect()
}
