//! Configuration for the HTTP artwork source.

use serde::{Deserialize, Serialize};

/// Collection endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Largest `limit` the collection API accepts in one request.
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("artwork-table/", env!("CARGO_PKG_VERSION"));

/// Endpoint and request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Collection listing URL, without query string.
    pub base_url: String,

    /// Sent as both `User-Agent` and `AIC-User-Agent`.
    pub user_agent: String,

    /// Page size cap used when "select first N" needs more than one request.
    pub max_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Same configuration against a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }
}
