//! HTTP client for the collection listing endpoint.

use std::num::NonZeroUsize;

use gallery_core::{ArtworkSource, FetchError, PageRequest};
use gallery_model::{Artwork, ArtworkId, ArtworkPage};
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::types::{ID_FIELDS, IdOnly, ListResponse, PAGE_FIELDS};

/// [`ArtworkSource`] backed by the collection API.
///
/// One attempt per request: no retry, no timeout.
#[derive(Debug, Clone)]
pub struct HttpArtworkSource {
    client: reqwest::Client,
    endpoint: Url,
    max_limit: usize,
}

impl HttpArtworkSource {
    /// Creates a source for the configured endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if endpoint.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Network(format!("invalid user agent: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, user_agent.clone());
        headers.insert("AIC-User-Agent", user_agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            max_limit: config.max_limit.max(1),
        })
    }

    /// Listing URL for one page of the given field projection.
    ///
    /// Always sorted by ascending id.
    pub fn list_url(&self, page: usize, limit: usize, fields: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("fields", &fields.join(","))
            .append_pair("sort[id]", "asc");
        url
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<ListResponse<T>, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl ArtworkSource for HttpArtworkSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<ArtworkPage, FetchError> {
        let url = self.list_url(request.page, request.limit, PAGE_FIELDS);
        let response: ListResponse<Artwork> = self.get_list(url).await?;
        Ok(response.into())
    }

    async fn fetch_top_ids(&self, count: NonZeroUsize) -> Result<Vec<ArtworkId>, FetchError> {
        let count = count.get();
        if count <= self.max_limit {
            let response: ListResponse<IdOnly> =
                self.get_list(self.list_url(1, count, ID_FIELDS)).await?;
            let mut ids: Vec<ArtworkId> = response.data.into_iter().map(|r| r.id).collect();
            ids.truncate(count);
            return Ok(ids);
        }

        // More than one request's worth: walk full pages until we have enough.
        let mut ids = Vec::with_capacity(count);
        let mut page = 1;
        while ids.len() < count {
            let url = self.list_url(page, self.max_limit, ID_FIELDS);
            let response: ListResponse<IdOnly> = self.get_list(url).await?;
            let received = response.data.len();
            ids.extend(response.data.into_iter().map(|r| r.id));

            let exhausted =
                u64::try_from(ids.len()).unwrap_or(u64::MAX) >= response.pagination.total;
            if received < self.max_limit || exhausted {
                break;
            }
            page += 1;
        }
        ids.truncate(count);
        tracing::debug!(
            requested = count,
            received = ids.len(),
            pages = page,
            "Fetched ids"
        );
        Ok(ids)
    }
}
