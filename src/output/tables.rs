use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cells(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Jenkins ball colors mapped to terminal colors.
pub fn color_coded_status_cell(status: &str, building: bool) -> Cell {
    let text = if building {
        format!("{status} (building)")
    } else {
        status.to_string()
    };
    match status {
        "blue" => Cell::new(text).fg(TableColor::Green),
        "yellow" => Cell::new(text).fg(TableColor::Yellow),
        "red" => Cell::new(text).fg(TableColor::Red),
        _ => Cell::new(text).fg(TableColor::DarkGrey),
    }
}

pub fn last_build_cell(last_build: Option<i64>) -> Cell {
    Cell::new(format_timestamp(last_build))
}

pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || "never".to_string(),
            |date| date.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
}
