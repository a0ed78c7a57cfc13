use chrono::{DateTime, NaiveDate};

/// Server-assigned record identifier (opaque string, e.g. an ObjectId).
pub type RecordId = String;

/// Wire format for calendar dates sent by drafts.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Human format used when listing records, e.g. `Mar 5, 2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Parse a date as the API returns it.
///
/// Accepts plain `YYYY-MM-DD` as well as full RFC 3339 timestamps
/// (the server echoes stored dates as `2024-03-05T00:00:00.000Z`).
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Render a wire date for display, falling back to the raw text when it
/// cannot be parsed.
pub fn display_date(raw: &str) -> String {
    match parse_wire_date(raw) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Format a draft date for the wire.
pub fn wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}
