//! Terminal rendering of the table view.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use gallery_core::{Artwork, ArtworkId, BulkSelect, TableView};

/// Whether table cells carry ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

const COLUMNS: [&str; 7] = [
    "",
    "ID",
    "Title",
    "Place of Origin",
    "Artist",
    "Inscriptions",
    "Dates",
];

/// Builds the page table, marking selected rows.
pub fn artwork_table(view: &TableView<'_>, color: ColorMode) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table, color);
    table.set_header(COLUMNS.into_iter().map(header_cell).collect::<Vec<_>>());
    for artwork in view.records {
        table.add_row(artwork_row(artwork, view.selection.contains(&artwork.id)));
    }
    table
}

/// Identifier listing for `top-ids`.
pub fn id_table(ids: &[ArtworkId], color: ColorMode) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table, color);
    table.set_header(vec![header_cell("#"), header_cell("ID")]);
    for (index, id) in ids.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(id)]);
    }
    table
}

/// "Showing 11-20 of 1000 | Page 2 of 100 | Total Selected: 3"
pub fn status_line(view: &TableView<'_>) -> String {
    let state = view.page_state;
    let range = if view.records.is_empty() {
        format!("Showing 0 of {}", view.total_records)
    } else {
        format!(
            "Showing {}-{} of {}",
            state.first() + 1,
            state.first() + view.records.len(),
            view.total_records
        )
    };
    let mut line = format!(
        "{range} | Page {} of {} | Total Selected: {}",
        state.page() + 1,
        state.total_pages(view.total_records),
        view.selected_count
    );
    if view.loading {
        line.push_str(" | Loading...");
    }
    line
}

/// Bulk panel line, or `None` while the panel is closed.
pub fn bulk_line(bulk: &BulkSelect) -> Option<String> {
    match bulk {
        BulkSelect::Closed => None,
        BulkSelect::Open { input } if input.is_empty() => {
            Some("Select first N rows: (type `count N`, then `submit`)".to_string())
        }
        BulkSelect::Open { input } => Some(format!("Select first N rows: {input}")),
        BulkSelect::Submitting { count } => Some(format!("Selecting first {count} rows...")),
    }
}

/// Full frame: table, status and bulk panel.
pub fn frame(view: &TableView<'_>, color: ColorMode) -> String {
    let mut out = artwork_table(view, color).to_string();
    out.push('\n');
    out.push_str(&status_line(view));
    if let Some(bulk) = bulk_line(view.bulk) {
        out.push('\n');
        out.push_str(&bulk);
    }
    out
}

fn artwork_row(artwork: &Artwork, selected: bool) -> Vec<Cell> {
    let marker = if selected {
        Cell::new("[x]").fg(Color::Green)
    } else {
        dim_cell("[ ]")
    };
    vec![
        marker,
        Cell::new(artwork.id),
        Cell::new(&artwork.title),
        optional_cell(artwork.place_of_origin_display()),
        Cell::new(&artwork.artist_display),
        optional_cell(artwork.inscriptions_display()),
        Cell::new(artwork.date_range()),
    ]
}

fn optional_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn apply_table_style(table: &mut Table, color: ColorMode) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    match color {
        ColorMode::Auto => {}
        ColorMode::Always => {
            table.enforce_styling();
        }
        ColorMode::Never => {
            table.force_no_tty();
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
