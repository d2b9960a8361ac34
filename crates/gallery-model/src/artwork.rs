//! The artwork record as displayed in the table.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ArtworkId;

/// An artwork fetched from the collection API.
///
/// Immutable once decoded. Only `id` participates in selection; every other
/// field is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_display: String,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_start: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_end: i32,
}

impl Artwork {
    /// Creates a record with only the identifier and title set.
    pub fn new(id: impl Into<ArtworkId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            place_of_origin: None,
            artist_display: String::new(),
            inscriptions: None,
            date_start: 0,
            date_end: 0,
        }
    }

    /// Display string for the dating columns, e.g. `1884–1886`.
    ///
    /// No ordering check is made between start and end.
    pub fn date_range(&self) -> String {
        format!("{}\u{2013}{}", self.date_start, self.date_end)
    }

    /// Place of origin for display, empty when absent.
    pub fn place_of_origin_display(&self) -> &str {
        self.place_of_origin.as_deref().unwrap_or("")
    }

    /// Inscriptions for display, empty when absent.
    pub fn inscriptions_display(&self) -> &str {
        self.inscriptions.as_deref().unwrap_or("")
    }
}

/// Decodes an explicit JSON `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
