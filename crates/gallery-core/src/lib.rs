//! State core of the paginated artwork table.
//!
//! # Overview
//!
//! - [`PageState`] - offset, page size and page index, kept on page boundaries
//! - [`SelectionLedger`] - selected ids across every page
//! - [`BulkSelect`] - the "select first N" panel
//! - [`ArtworkTable`] - composes the above behind a message/update loop
//! - [`ArtworkSource`] - the fetch seam, implemented over HTTP by
//!   `gallery-client`
//!
//! The table performs no I/O. It returns [`Task`]s, which
//! [`runtime::perform`] executes against a source:
//!
//! ```no_run
//! use gallery_core::{ArtworkSource, ArtworkTable, TableMessage, runtime};
//!
//! async fn show_second_page(source: &impl ArtworkSource) {
//!     let mut table = ArtworkTable::default();
//!     let task = table.start();
//!     runtime::settle(&mut table, source, task).await;
//!     runtime::dispatch(&mut table, source, TableMessage::NextPage).await;
//!     println!("{} records", table.records().len());
//! }
//! ```

#![warn(clippy::all)]

pub mod bulk;
pub mod error;
pub mod ledger;
pub mod page_state;
pub mod runtime;
pub mod source;
pub mod table;

pub use bulk::{BulkSelect, parse_count};
pub use error::{BulkInputError, FetchError, Result, TableError};
pub use ledger::{LedgerDelta, SelectionLedger};
pub use page_state::{
    DEFAULT_ROWS_PER_PAGE, PageRequest, PageState, ROWS_PER_PAGE_OPTIONS, is_allowed_rows,
};
pub use source::ArtworkSource;
pub use table::{
    ArtworkTable, SubscriptionId, TableEvent, TableMessage, TableStatus, TableView, Task,
};

pub use gallery_model::{Artwork, ArtworkId, ArtworkPage};
