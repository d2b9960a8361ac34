//! Seam between the table and whatever serves artwork records.

use std::future::Future;
use std::num::NonZeroUsize;

use gallery_model::{ArtworkId, ArtworkPage};

use crate::error::FetchError;
use crate::page_state::PageRequest;

/// A paginated, id-sorted artwork collection.
///
/// Implementations make a single attempt per call: no retry, no timeout.
/// Results must be sorted by ascending id so page boundaries are stable.
pub trait ArtworkSource {
    /// Fetches one page of display records and the collection total.
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<ArtworkPage, FetchError>>;

    /// Fetches the ids of the first `count` records, independent of any page
    /// currently displayed.
    fn fetch_top_ids(
        &self,
        count: NonZeroUsize,
    ) -> impl Future<Output = Result<Vec<ArtworkId>, FetchError>>;
}
