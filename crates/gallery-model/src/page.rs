use crate::artwork::Artwork;
use crate::ids::ArtworkId;

/// One page of records together with the remote's total record count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkPage {
    pub records: Vec<Artwork>,
    pub total: u64,
}

impl ArtworkPage {
    pub fn new(records: Vec<Artwork>, total: u64) -> Self {
        Self { records, total }
    }

    /// Identifiers of the records on this page, in display order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
