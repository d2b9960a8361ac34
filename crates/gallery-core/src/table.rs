//! The table controller.
//!
//! `ArtworkTable` follows a message/update loop: the rendering side sends a
//! [`TableMessage`], the table mutates its state and returns a [`Task`]
//! describing the fetch to run, and the fetch's completion comes back as
//! another message. The table itself performs no I/O.
//!
//! # Request ordering
//!
//! Every page fetch carries a generation number. Only the completion of the
//! most recently issued fetch is applied; older completions are dropped, so a
//! slow response for a page the user already left can never overwrite the
//! page they are looking at.

use std::fmt;
use std::num::NonZeroUsize;

use gallery_model::{Artwork, ArtworkId, ArtworkPage};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::bulk::BulkSelect;
use crate::error::{FetchError, Result};
use crate::ledger::SelectionLedger;
use crate::page_state::{PageRequest, PageState};

// =============================================================================
// MESSAGES AND TASKS
// =============================================================================

/// Input events for the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMessage {
    /// Paginator reported a new offset/size/page.
    PageChanged {
        first: usize,
        rows: usize,
        page: usize,
    },
    GoToPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    RowsPerPageChanged(usize),

    /// Complete selection on the visible page (not a delta).
    SelectionChanged(Vec<ArtworkId>),

    BulkToggled,
    BulkInputChanged(String),
    BulkSubmitted,

    /// Completion of a page fetch.
    PageLoaded {
        generation: u64,
        result: std::result::Result<ArtworkPage, FetchError>,
    },
    /// Completion of a "select first N" identifier fetch.
    TopIdsLoaded(std::result::Result<Vec<ArtworkId>, FetchError>),
}

/// Work requested by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    None,
    FetchPage {
        generation: u64,
        request: PageRequest,
    },
    FetchTopIds {
        count: NonZeroUsize,
    },
}

impl Task {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// =============================================================================
// OBSERVATION
// =============================================================================

/// Summary of table state delivered with change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub page_state: PageState,
    pub loading: bool,
    pub total_records: u64,
    pub selected_count: usize,
    pub bulk_open: bool,
}

/// Notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// State changed; re-render.
    Changed(TableStatus),
    /// Blocking, user-facing message.
    Alert(String),
}

/// Handle returned by [`ArtworkTable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TableEvent)>;

/// Everything the rendering side needs for one frame.
#[derive(Debug, Serialize)]
pub struct TableView<'a> {
    pub records: &'a [Artwork],
    /// Selected ids among `records`, in display order.
    pub selection: Vec<ArtworkId>,
    pub loading: bool,
    pub total_records: u64,
    pub page_state: PageState,
    pub selected_count: usize,
    pub bulk: &'a BulkSelect,
}

// =============================================================================
// TABLE
// =============================================================================

/// Paginated remote artwork table with cross-page selection.
pub struct ArtworkTable {
    page_state: PageState,
    page: ArtworkPage,
    page_loading: bool,
    /// Set once a page has loaded, so `page.total` bounds navigation.
    total_known: bool,
    ledger: SelectionLedger,
    bulk: BulkSelect,
    /// Generation of the most recently issued page fetch.
    generation: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for ArtworkTable {
    fn default() -> Self {
        Self::new(PageState::default())
    }
}

impl fmt::Debug for ArtworkTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtworkTable")
            .field("page_state", &self.page_state)
            .field("records", &self.page.records.len())
            .field("total", &self.page.total)
            .field("page_loading", &self.page_loading)
            .field("total_known", &self.total_known)
            .field("selected", &self.ledger.len())
            .field("bulk", &self.bulk)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ArtworkTable {
    pub fn new(page_state: PageState) -> Self {
        Self {
            page_state,
            page: ArtworkPage::default(),
            page_loading: false,
            total_known: false,
            ledger: SelectionLedger::new(),
            bulk: BulkSelect::default(),
            generation: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Issues the fetch for the initial page state.
    pub fn start(&mut self) -> Task {
        self.issue_page_fetch()
    }

    /// Applies a message and returns the follow-up work.
    pub fn update(&mut self, message: TableMessage) -> Task {
        match message {
            TableMessage::PageChanged { first, rows, page } => {
                let task = self.on_page_change(first, rows, page);
                self.reject_invalid(task)
            }
            TableMessage::GoToPage(page) => {
                let next = if self.total_known {
                    self.page_state.go_to_within(page, self.page.total)
                } else {
                    self.page_state.go_to(page)
                };
                self.change_page(next)
            }
            TableMessage::NextPage => self.change_page(self.page_state.next(self.page.total)),
            TableMessage::PreviousPage => self.change_page(self.page_state.previous()),
            TableMessage::FirstPage => self.change_page(self.page_state.go_to(0)),
            TableMessage::LastPage => self.change_page(self.page_state.last(self.page.total)),
            TableMessage::RowsPerPageChanged(rows) => {
                let next = self.page_state.with_rows_per_page(rows);
                let task = next.map(|state| self.change_page(state));
                self.reject_invalid(task)
            }

            TableMessage::SelectionChanged(ids) => {
                let delta = self.ledger.reconcile(self.page.ids(), ids);
                debug!(
                    added = delta.added,
                    removed = delta.removed,
                    selected = self.ledger.len(),
                    "Reconciled page selection"
                );
                self.notify_changed();
                Task::None
            }

            TableMessage::BulkToggled => {
                self.bulk.toggle();
                self.notify_changed();
                Task::None
            }
            TableMessage::BulkInputChanged(text) => {
                if self.bulk.set_input(text) {
                    self.notify_changed();
                }
                Task::None
            }
            TableMessage::BulkSubmitted => self.submit_bulk(),

            TableMessage::PageLoaded { generation, result } => {
                self.apply_page(generation, result);
                Task::None
            }
            TableMessage::TopIdsLoaded(result) => {
                self.apply_top_ids(result);
                Task::None
            }
        }
    }

    /// Handles a paginator event.
    ///
    /// Fails without side effects if `rows` is not an allowed page size.
    pub fn on_page_change(&mut self, first: usize, rows: usize, page: usize) -> Result<Task> {
        let next = PageState::from_paginator(first, rows, page)?;
        Ok(self.change_page(next))
    }

    fn reject_invalid(&self, task: Result<Task>) -> Task {
        task.unwrap_or_else(|err| {
            warn!(error = %err, page_state = ?self.page_state, "Ignoring page change");
            Task::None
        })
    }

    fn change_page(&mut self, next: PageState) -> Task {
        if next == self.page_state {
            return Task::None;
        }
        self.page_state = next;
        self.issue_page_fetch()
    }

    fn issue_page_fetch(&mut self) -> Task {
        self.generation += 1;
        self.page_loading = true;
        let request = self.page_state.request();
        debug!(
            generation = self.generation,
            page = request.page,
            limit = request.limit,
            "Issuing page fetch"
        );
        self.notify_changed();
        Task::FetchPage {
            generation: self.generation,
            request,
        }
    }

    fn apply_page(
        &mut self,
        generation: u64,
        result: std::result::Result<ArtworkPage, FetchError>,
    ) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding superseded page response"
            );
            return;
        }
        self.page_loading = false;
        match result {
            Ok(page) => {
                info!(
                    page = self.page_state.api_page(),
                    records = page.len(),
                    total = page.total,
                    "Loaded artworks"
                );
                self.page = page;
                self.total_known = true;
            }
            Err(err) => {
                // Stale but valid data stays on screen.
                error!(error = %err, page = self.page_state.api_page(), "Failed to load artworks");
            }
        }
        self.notify_changed();
    }

    fn submit_bulk(&mut self) -> Task {
        match self.bulk.submit() {
            Ok(Some(count)) => {
                info!(count = count.get(), "Selecting first records");
                self.notify_changed();
                Task::FetchTopIds { count }
            }
            Ok(None) => Task::None,
            Err(err) => {
                warn!(error = %err, "Rejected bulk selection input");
                self.notify(&TableEvent::Alert(err.to_string()));
                Task::None
            }
        }
    }

    fn apply_top_ids(&mut self, result: std::result::Result<Vec<ArtworkId>, FetchError>) {
        if !self.bulk.is_submitting() {
            debug!("Ignoring identifier response with no submission in flight");
            return;
        }
        match result {
            Ok(ids) => {
                let delta = self.ledger.bulk_add(ids);
                info!(
                    added = delta.added,
                    selected = self.ledger.len(),
                    "Bulk selection applied"
                );
            }
            Err(err) => {
                error!(error = %err, "Failed to fetch artwork ids for bulk selection");
                self.notify(&TableEvent::Alert(err.user_message().to_string()));
            }
        }
        self.bulk.finish();
        self.notify_changed();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn page_state(&self) -> PageState {
        self.page_state
    }

    pub fn records(&self) -> &[Artwork] {
        &self.page.records
    }

    pub fn total_records(&self) -> u64 {
        self.page.total
    }

    pub fn ledger(&self) -> &SelectionLedger {
        &self.ledger
    }

    pub fn bulk(&self) -> &BulkSelect {
        &self.bulk
    }

    /// True while a page fetch or a bulk submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.page_loading || self.bulk.is_submitting()
    }

    pub fn status(&self) -> TableStatus {
        TableStatus {
            page_state: self.page_state,
            loading: self.is_loading(),
            total_records: self.page.total,
            selected_count: self.ledger.len(),
            bulk_open: self.bulk.is_open(),
        }
    }

    /// Borrowed view for rendering.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            records: &self.page.records,
            selection: self.ledger.selected_on(&self.page.records),
            loading: self.is_loading(),
            total_records: self.page.total,
            page_state: self.page_state,
            selected_count: self.ledger.len(),
            bulk: &self.bulk,
        }
    }

    // -------------------------------------------------------------------------
    // Subscribers
    // -------------------------------------------------------------------------

    /// Registers a listener for change and alert notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(&TableEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify_changed(&mut self) {
        let event = TableEvent::Changed(self.status());
        self.notify(&event);
    }

    fn notify(&mut self, event: &TableEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn page_of(ids: std::ops::RangeInclusive<u64>, total: u64) -> ArtworkPage {
        ArtworkPage::new(
            ids.map(|id| Artwork::new(id, format!("Artwork {id}")))
                .collect(),
            total,
        )
    }

    fn fetch_generation(task: Task) -> u64 {
        match task {
            Task::FetchPage { generation, .. } => generation,
            other => panic!("expected page fetch, got {other:?}"),
        }
    }

    #[test]
    fn start_requests_first_page() {
        let mut table = ArtworkTable::default();
        let task = table.start();
        assert_eq!(
            task,
            Task::FetchPage {
                generation: 1,
                request: PageRequest { page: 1, limit: 10 },
            }
        );
        assert!(table.is_loading());
    }

    #[test]
    fn same_page_change_schedules_nothing() {
        let mut table = ArtworkTable::default();
        assert!(
            table
                .update(TableMessage::PageChanged {
                    first: 0,
                    rows: 10,
                    page: 0
                })
                .is_none()
        );
        assert!(!table.is_loading());
    }

    #[test]
    fn invalid_page_size_changes_nothing() {
        let mut table = ArtworkTable::default();
        assert!(table.on_page_change(0, 3, 0).is_err());
        assert!(table.update(TableMessage::RowsPerPageChanged(0)).is_none());
        assert_eq!(table.page_state(), PageState::default());
    }

    #[test]
    fn huge_page_number_saturates_before_first_load() {
        let mut table = ArtworkTable::default();
        let _ = table.start();
        let task = table.update(TableMessage::GoToPage(usize::MAX - 1));
        let Task::FetchPage { request, .. } = task else {
            panic!("expected page fetch, got {task:?}");
        };
        assert_eq!(request.page, usize::MAX / 10 + 1);
        let state = table.page_state();
        assert_eq!(state.page() * state.rows(), state.first());
    }

    #[test]
    fn go_to_page_clamps_once_total_is_known() {
        let mut table = ArtworkTable::default();
        let first = fetch_generation(table.start());
        table.update(TableMessage::PageLoaded {
            generation: first,
            result: Ok(page_of(1..=10, 100)),
        });

        let task = table.update(TableMessage::GoToPage(usize::MAX - 1));
        let Task::FetchPage { request, .. } = task else {
            panic!("expected page fetch, got {task:?}");
        };
        assert_eq!(request, PageRequest { page: 10, limit: 10 });
        assert_eq!(table.page_state().first(), 90);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut table = ArtworkTable::default();
        let first = fetch_generation(table.start());
        let second = fetch_generation(table.update(TableMessage::GoToPage(1)));

        table.update(TableMessage::PageLoaded {
            generation: second,
            result: Ok(page_of(11..=20, 100)),
        });
        table.update(TableMessage::PageLoaded {
            generation: first,
            result: Ok(page_of(1..=10, 100)),
        });

        assert_eq!(table.records()[0].id, ArtworkId::new(11));
        assert!(!table.is_loading());
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut table = ArtworkTable::default();
        let first = fetch_generation(table.start());
        let _second = table.update(TableMessage::GoToPage(1));
        table.update(TableMessage::PageLoaded {
            generation: first,
            result: Ok(page_of(1..=10, 100)),
        });
        assert!(table.is_loading());
        assert!(table.records().is_empty());
    }

    #[test]
    fn subscribers_see_changes_and_alerts() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut table = ArtworkTable::default();
        let sink = Rc::clone(&events);
        let id = table.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        table.update(TableMessage::BulkToggled);
        table.update(TableMessage::BulkInputChanged("-1".to_string()));
        table.update(TableMessage::BulkSubmitted);

        {
            let events = events.borrow();
            assert_eq!(events.len(), 3);
            assert!(matches!(events[0], TableEvent::Changed(status) if status.bulk_open));
            assert!(matches!(&events[2], TableEvent::Alert(text) if text.contains("greater than zero")));
        }

        assert!(table.unsubscribe(id));
        assert!(!table.unsubscribe(id));
        table.update(TableMessage::BulkToggled);
        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn top_ids_without_submission_are_ignored() {
        let mut table = ArtworkTable::default();
        table.update(TableMessage::TopIdsLoaded(Ok(vec![ArtworkId::new(1)])));
        assert!(table.ledger().is_empty());
    }
}
