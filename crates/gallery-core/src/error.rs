//! Error types for the table core.

use thiserror::Error;

/// Errors reported by an [`ArtworkSource`](crate::source::ArtworkSource).
///
/// A fetch is attempted exactly once; none of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("collection API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Returns a user-friendly message suitable for an alert.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach the collection API. Please check your internet connection."
            }
            Self::Status { .. } => "The collection API rejected the request.",
            Self::Decode(_) => "The collection API returned an unexpected response.",
            Self::InvalidUrl(_) => "The collection endpoint is misconfigured.",
        }
    }
}

/// Errors from page-state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    /// Page size is not one of the allowed options.
    #[error("unsupported page size {rows}; expected one of {allowed:?}")]
    InvalidPageSize {
        /// Requested rows per page.
        rows: usize,
        /// Allowed rows-per-page options.
        allowed: &'static [usize],
    },
}

/// Rejected input for "select first N".
///
/// The `Display` text is shown to the user as an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BulkInputError {
    /// Nothing but whitespace was entered.
    #[error("Please enter the number of rows to select.")]
    Empty,

    /// The input is not an integer.
    #[error("'{0}' is not a whole number.")]
    NotANumber(String),

    /// The input is zero or negative.
    #[error("Please enter a number greater than zero (got {0}).")]
    NotPositive(String),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
