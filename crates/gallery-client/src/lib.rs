//! HTTP artwork source for the artwork table.
//!
//! [`HttpArtworkSource`] implements [`gallery_core::ArtworkSource`] against a
//! read-only, versioned collection endpoint (by default the Art Institute of
//! Chicago `artworks` listing). Every request asks for a fixed field
//! projection sorted by ascending id, so page boundaries do not shift between
//! requests.
//!
//! # Example
//!
//! ```no_run
//! use gallery_client::{ClientConfig, HttpArtworkSource};
//! use gallery_core::{ArtworkTable, runtime};
//!
//! async fn first_page() -> Result<(), gallery_core::FetchError> {
//!     let source = HttpArtworkSource::new(&ClientConfig::default())?;
//!     let mut table = ArtworkTable::default();
//!     let task = table.start();
//!     runtime::settle(&mut table, &source, task).await;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod types;

pub use client::HttpArtworkSource;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_LIMIT};
