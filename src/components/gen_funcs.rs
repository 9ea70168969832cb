use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EpisodeError, PageResult};

/// Naive timestamp shapes the episode API has been seen publishing, with or
/// without fractional seconds.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a wire `published_at` into a comparable publication instant.
///
/// Accepts RFC 3339 with a UTC offset (normalized to UTC), the naive forms
/// above, and a bare `YYYY-MM-DD` (taken as midnight). Anything else fails
/// the whole page build rather than falling back to some stand-in moment.
pub fn parse_published_instant(raw: &str) -> PageResult<NaiveDateTime> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date_time.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(date_time);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(EpisodeError::InvalidDate {
        value: raw.to_string(),
    })
}

/// The calendar date of a wire `published_at`, for display.
pub fn parse_published_at(raw: &str) -> PageResult<NaiveDate> {
    parse_published_instant(raw).map(|instant| instant.date())
}

/// "8 jan 21" style display dates: unpadded day, Brazilian Portuguese month
/// abbreviation, two digit year.
pub fn format_published_date(date: NaiveDate) -> String {
    date.format_localized("%-d %b %y", Locale::pt_BR).to_string()
}

/// Renders a duration as `H:MM:SS`. Hours are never zero padded, so a 20
/// minute episode reads "0:20:00" and a long one "1:02:03".
pub fn convert_duration_to_time_string(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
