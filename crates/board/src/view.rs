use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use shared::{domain::Event, protocol::SortKey};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Filters by case-insensitive name substring, then stable-sorts by `sort_key`.
pub fn derive_view<'a>(events: &'a [Event], query: &str, sort_key: SortKey) -> Vec<&'a Event> {
    let needle = query.to_lowercase();
    let mut view: Vec<&Event> = events
        .iter()
        .filter(|event| event.name.to_lowercase().contains(&needle))
        .collect();

    match sort_key {
        SortKey::Name => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Date => view.sort_by_cached_key(|event| parse_timestamp(event.date.as_deref())),
    }
    view
}

/// Collation-style ordering in three levels: base letters (accents and case
/// ignored), then accents (unaccented first), then case (lowercase first).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| compare_case(a, b))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}

fn accented(name: &str) -> String {
    name.to_lowercase().nfd().collect()
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (left, right) in a.chars().zip(b.chars()) {
        if left == right {
            continue;
        }
        return match (left.is_lowercase(), right.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => left.cmp(&right),
        };
    }
    a.cmp(b)
}

/// Milliseconds since the epoch, or `None` when missing or unparseable.
///
/// `None` orders before every valid timestamp. Values without an offset are
/// read as UTC.
pub fn parse_timestamp(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
