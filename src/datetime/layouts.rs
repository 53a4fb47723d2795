//! Parsing against ordered lists of candidate layouts
//!
//! Each list is tried front to back and the first layout that parses wins, so
//! ambiguous inputs resolve to the earliest matching layout.

use crate::null::NotNull;
use crate::pgtype::{PgDate, PgTimestamptz};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Accepted date layouts, in priority order
pub const DATE_LAYOUTS: [&str; 6] = [
    "%Y-%m-%d",          // ISO date
    "%d/%m/%Y",          // d/m/yyyy
    "%d/%m/%Y %H:%M:%S", // d/m/yyyy H:M:S
    "%m/%d/%Y",          // mm/dd/yyyy, reached only when day/month cannot swap
    "%Y-%m-%d %H:%M:%S", // ISO datetime
    "%Y/%m/%d",          // yyyy/mm/dd
];

/// Naive layouts accepted for `timestamptz` after RFC 3339, read as UTC
pub const TIMESTAMPTZ_NAIVE_LAYOUTS: [&str; 1] = ["%Y-%m-%d %H:%M:%S"];

/// Layouts that carry a date only
pub const TIMESTAMPTZ_DATE_LAYOUTS: [&str; 1] = ["%Y-%m-%d"];

/// A parser for a single layout
pub trait LayoutParse: Sized {
    fn parse_layout(input: &str, layout: &str) -> Option<Self>;
}

impl LayoutParse for NaiveDate {
    fn parse_layout(input: &str, layout: &str) -> Option<Self> {
        NaiveDate::parse_from_str(input, layout).ok()
    }
}

impl LayoutParse for NaiveDateTime {
    fn parse_layout(input: &str, layout: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(input, layout).ok()
    }
}

/// Try each layout in order and return the first successful parse
pub fn parse_with_layouts<T: LayoutParse>(input: &str, layouts: &[&str]) -> Option<T> {
    layouts
        .iter()
        .find_map(|layout| T::parse_layout(input, layout))
}

/// Convert a string to a nullable date using [`DATE_LAYOUTS`]
pub fn string_to_pg_date(input: &str) -> PgDate {
    if !input.not_null() {
        return PgDate::null();
    }

    match parse_with_layouts::<NaiveDate>(input, &DATE_LAYOUTS) {
        Some(date) => PgDate::new(date),
        None => {
            debug!("No date layout matched {:?}", input);
            PgDate::null()
        }
    }
}

/// Parse a `timestamptz` string: RFC 3339 first, then naive layouts as UTC
pub fn parse_timestamptz_layouts(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.to_utc());
    }

    if let Some(ts) = parse_with_layouts::<NaiveDateTime>(input, &TIMESTAMPTZ_NAIVE_LAYOUTS) {
        return Some(ts.and_utc());
    }

    parse_with_layouts::<NaiveDate>(input, &TIMESTAMPTZ_DATE_LAYOUTS)
        .map(|date| NaiveDateTime::from(date).and_utc())
}

/// Convert a string to a nullable `timestamptz` using the layout list
pub fn string_to_pg_timestamptz_layouts(input: &str) -> PgTimestamptz {
    match parse_timestamptz_layouts(input) {
        Some(ts) => PgTimestamptz::new(ts),
        None => {
            debug!("No timestamptz layout matched {:?}", input);
            PgTimestamptz::null()
        }
    }
}
