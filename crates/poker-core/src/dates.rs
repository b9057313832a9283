use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::warn;

// ── Header date parsing ───────────────────────────────────────────────────────

/// Date-only patterns seen in spreadsheet headers.
///
/// `%y` must be tried before `%Y`: chrono accepts a two-digit `%Y` and would
/// read `1/1/25` as year 25.
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Date-time patterns; the time-of-day is parsed and then dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a header cell into a calendar day.
///
/// Handles `M/D/YY`, `M/D/YYYY`, `YYYY-MM-DD`, the same with a time-of-day
/// suffix, and RFC 3339 timestamps. Any time component is discarded.
/// Returns `None` for blank or unrecognised cells.
pub fn parse_calendar_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    warn!("could not parse date header \"{}\"", s);
    None
}

// ── Calendar-day comparison ──────────────────────────────────────────────────

/// `(year, month, day)` of a date-like value.
///
/// Grouping, sorting and de-duplication of session dates all go through this
/// key so that two values on the same day compare equal whatever their
/// time-of-day.
pub fn calendar_key<D: Datelike>(date: &D) -> (i32, u32, u32) {
    (date.year(), date.month(), date.day())
}

/// Whether `a` and `b` fall on the same calendar day.
pub fn same_calendar_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    calendar_key(a) == calendar_key(b)
}
