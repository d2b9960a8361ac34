//! Record types for the artwork table.
//!
//! These types are shared between `gallery-core` (state) and
//! `gallery-client` (wire decoding), so they carry serde derives matching the
//! collection API's snake_case field names.

pub mod artwork;
pub mod ids;
pub mod page;

pub use artwork::Artwork;
pub use ids::ArtworkId;
pub use page::ArtworkPage;
