//! Date parsing and the monthly forecast calendar

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Parse a date cell.
///
/// Year-month cells (`2024-03`, `2024/03`, `2024.03`, `202403`) map to the
/// first of the month; any time of day is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
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

    parse_year_month(s)
}

fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = match s.split_once(['-', '/', '.']) {
        Some((y, m)) => (y, m),
        None if s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) => s.split_at(4),
        None => return None,
    };
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// `n` consecutive month starts beginning with the month after `after`.
///
/// A date that is already the first of its month still advances by one.
pub fn month_starts(after: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let Some(anchor) = NaiveDate::from_ymd_opt(after.year(), after.month(), 1) else {
        return Vec::new();
    };
    (1..=n)
        .map_while(|i| anchor.checked_add_months(Months::new(i as u32)))
        .collect()
}
