use chrono::{NaiveDate, NaiveDateTime};

const DRAW_DATE_FORMAT: &str = "%Y-%m-%d";
const STATUS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn date_part(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date).trim()
}

/// Parses a calendar date and re-renders it zero-padded, or `None` if it is not a real date.
pub fn canonical_draw_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, DRAW_DATE_FORMAT)
        .ok()
        .map(|d| d.format(DRAW_DATE_FORMAT).to_string())
}

pub fn format_status_timestamp(now: NaiveDateTime) -> String {
    now.format(STATUS_TIMESTAMP_FORMAT).to_string()
}
