//! Pagination parameters for the remote table.
//!
//! The offset `first` is authoritative. Every constructor snaps it to a page
//! boundary, so `page * rows == first` holds for every value of
//! [`PageState`].

use serde::Serialize;

use crate::error::{Result, TableError};

/// Rows-per-page choices offered by the paginator.
pub const ROWS_PER_PAGE_OPTIONS: &[usize] = &[5, 10, 20, 50];

/// Page size used until the user picks another one.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Which slice of the remote collection is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageState {
    first: usize,
    rows: usize,
    page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            first: 0,
            rows: DEFAULT_ROWS_PER_PAGE,
            page: 0,
        }
    }
}

/// Returns true if `rows` is one of [`ROWS_PER_PAGE_OPTIONS`].
pub fn is_allowed_rows(rows: usize) -> bool {
    ROWS_PER_PAGE_OPTIONS.contains(&rows)
}

fn check_rows(rows: usize) -> Result<()> {
    if is_allowed_rows(rows) {
        Ok(())
    } else {
        Err(TableError::InvalidPageSize {
            rows,
            allowed: ROWS_PER_PAGE_OPTIONS,
        })
    }
}

impl PageState {
    /// First page with the given page size.
    pub fn with_rows(rows: usize) -> Result<Self> {
        check_rows(rows)?;
        Ok(Self {
            first: 0,
            rows,
            page: 0,
        })
    }

    /// Builds a page state from a paginator event.
    ///
    /// The offset decides the page; a disagreeing `page` is ignored.
    pub fn from_paginator(first: usize, rows: usize, page: usize) -> Result<Self> {
        check_rows(rows)?;
        let snapped = first / rows;
        if snapped != page || snapped * rows != first {
            tracing::debug!(
                first,
                rows,
                page,
                snapped,
                "Paginator event not on a page boundary, snapping to offset"
            );
        }
        Ok(Self::at(snapped, rows))
    }

    /// Page `page`, saturated at the last page whose offset fits in `usize`.
    fn at(page: usize, rows: usize) -> Self {
        let page = page.min(usize::MAX / rows);
        Self {
            first: page * rows,
            rows,
            page,
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// One-based page number sent to the remote; page 0 is sent as 1.
    pub fn api_page(&self) -> usize {
        self.page + 1
    }

    /// The remote request for this page.
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.api_page(),
            limit: self.rows,
        }
    }

    /// Number of pages needed for `total` records, never less than one.
    pub fn total_pages(&self, total: u64) -> usize {
        let total = usize::try_from(total).unwrap_or(usize::MAX);
        total.div_ceil(self.rows).max(1)
    }

    /// Same page size, different page.
    #[must_use]
    pub fn go_to(self, page: usize) -> Self {
        Self::at(page, self.rows)
    }

    /// Page `page`, clamped to the last page for `total` records.
    #[must_use]
    pub fn go_to_within(self, page: usize, total: u64) -> Self {
        self.go_to(page.min(self.total_pages(total) - 1))
    }

    /// Next page, clamped to the last page for `total` records.
    #[must_use]
    pub fn next(self, total: u64) -> Self {
        let last = self.total_pages(total) - 1;
        self.go_to(self.page.saturating_add(1).min(last))
    }

    #[must_use]
    pub fn previous(self) -> Self {
        self.go_to(self.page.saturating_sub(1))
    }

    #[must_use]
    pub fn last(self, total: u64) -> Self {
        self.go_to(self.total_pages(total) - 1)
    }

    /// New page size, back to the first page.
    pub fn with_rows_per_page(self, rows: usize) -> Result<Self> {
        Self::with_rows(rows)
    }
}

/// A page request in the remote's terms: one-based page number and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}
