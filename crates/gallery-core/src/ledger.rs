//! Cross-page selection ledger.
//!
//! A table widget only knows about the rows it is rendering. The ledger keeps
//! the selection for every page the user has visited, and reconciles the
//! widget's per-page report against it without touching other pages.

use std::collections::BTreeSet;

use gallery_model::{Artwork, ArtworkId};

/// Outcome of a reconciliation or bulk add, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerDelta {
    pub added: usize,
    pub removed: usize,
}

/// The set of selected artwork identifiers across all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionLedger {
    selected: BTreeSet<ArtworkId>,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the widget's selection for the visible page.
    ///
    /// `newly_selected` is the complete selection on the visible page, not a
    /// delta. Ids in `displayed` that are missing from it are removed; every
    /// id in it is added. Ids outside `displayed` are never removed.
    pub fn reconcile<D, N>(&mut self, displayed: D, newly_selected: N) -> LedgerDelta
    where
        D: IntoIterator<Item = ArtworkId>,
        N: IntoIterator<Item = ArtworkId>,
    {
        let newly_selected: BTreeSet<ArtworkId> = newly_selected.into_iter().collect();
        let mut delta = LedgerDelta::default();

        for id in displayed {
            if !newly_selected.contains(&id) && self.selected.remove(&id) {
                delta.removed += 1;
            }
        }
        for id in newly_selected {
            if self.selected.insert(id) {
                delta.added += 1;
            }
        }
        delta
    }

    /// Adds every id; existing members are kept.
    pub fn bulk_add<I>(&mut self, ids: I) -> LedgerDelta
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        let added = ids.into_iter().filter(|id| self.selected.insert(*id)).count();
        LedgerDelta { added, removed: 0 }
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected ids, across all pages.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.selected.iter().copied()
    }

    /// The ids on `records` that are selected, in display order.
    pub fn selected_on(&self, records: &[Artwork]) -> Vec<ArtworkId> {
        records
            .iter()
            .map(|r| r.id)
            .filter(|id| self.selected.contains(id))
            .collect()
    }
}
