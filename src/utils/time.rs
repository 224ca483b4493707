use chrono::{DateTime, NaiveDate};

/// hh.ru timestamps carry an offset without a colon, e.g. `2024-01-15T10:00:00+0300`.
const HH_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Calendar date of a publication timestamp, in the timestamp's own offset.
pub fn publish_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_str(raw, HH_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}
