//! Wire types for the collection listing endpoint.

use gallery_model::{Artwork, ArtworkId, ArtworkPage};
use serde::Deserialize;

/// Field projection for page fetches.
pub const PAGE_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Field projection for identifier-only fetches.
pub const ID_FIELDS: &[&str] = &["id"];

/// `{ data: [...], pagination: {...} }` listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Pagination block of a listing response. Only `total` is read.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub total: u64,
}

/// A record from an identifier-only projection.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdOnly {
    pub id: ArtworkId,
}

impl From<ListResponse<Artwork>> for ArtworkPage {
    fn from(response: ListResponse<Artwork>) -> Self {
        ArtworkPage::new(response.data, response.pagination.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_listing() {
        let json = r#"{
            "pagination": {
                "total": 129884,
                "limit": 2,
                "offset": 0,
                "total_pages": 64942,
                "current_page": 1,
                "next_url": "https://api.artic.edu/api/v1/artworks?page=2&limit=2"
            },
            "data": [
                {"id": 1, "title": "A", "place_of_origin": null, "artist_display": "X",
                 "inscriptions": null, "date_start": 1800, "date_end": 1801},
                {"id": 2, "title": "B", "place_of_origin": "Japan", "artist_display": "Y",
                 "inscriptions": "signed", "date_start": 1850, "date_end": 1850}
            ],
            "info": {"license_text": "..."},
            "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
        }"#;
        let response: ListResponse<Artwork> = serde_json::from_str(json).unwrap();
        let page = ArtworkPage::from(response);
        assert_eq!(page.total, 129884);
        assert_eq!(page.records[1].place_of_origin.as_deref(), Some("Japan"));
    }

    #[test]
    fn test_decode_id_projection() {
        let json = r#"{"pagination": {"total": 3}, "data": [{"id": 5}, {"id": 9}]}"#;
        let response: ListResponse<IdOnly> = serde_json::from_str(json).unwrap();
        let ids: Vec<u64> = response.data.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_missing_pagination_is_an_error() {
        let json = r#"{"data": []}"#;
        assert!(serde_json::from_str::<ListResponse<IdOnly>>(json).is_err());
    }
}
