//! Ad-hoc timestamp normalization
//!
//! Turns loosely formatted date/time strings into the canonical
//! `YYYY-MM-DD HH:MM:SS.ffffff` form and parses the result.
//!
//! # Input assumptions
//!
//! - Dates are read as day-month-year (`D-M-Y`, `/` or `-` separated). The one
//!   exception is a date whose first component has four digits, which is
//!   already year-first and is kept in order.
//! - Two-digit years belong to the configured century (2000 by default), so
//!   `99` becomes `2099`, never `1999`.
//! - A missing time part means midnight. Fractional seconds are padded or
//!   truncated to microseconds.
//!
//! Failures never escape as panics: the `try` style functions return
//! `HelperError::Unparseable` and the `string_to_*` functions collapse every
//! failure into an invalid wrapper.

use crate::core::config::{DEFAULT_TWO_DIGIT_YEAR_CENTURY, HelpersConfig};
use crate::core::{HelperError, HelperResult};
use crate::null::NotNull;
use crate::pgtype::{PgTimestamp, PgTimestamptz};
use chrono::NaiveDateTime;
use std::ops::RangeInclusive;
use tracing::debug;

/// Layout of the canonical string
pub const CANONICAL_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.6f";

// Parsing accepts any fraction width; the canonical string always has six.
const PARSE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DEFAULT_TIME_PART: &str = "00:00:00.000000";
const FRACTION_DIGITS: usize = 6;

/// Normalizer for loosely formatted timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampNormalizer {
    two_digit_year_century: i32,
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_TWO_DIGIT_YEAR_CENTURY)
    }
}

impl TimestampNormalizer {
    /// Create a normalizer that expands two-digit years into `century`
    pub fn new(two_digit_year_century: i32) -> Self {
        Self {
            two_digit_year_century,
        }
    }

    pub fn from_config(config: &HelpersConfig) -> Self {
        Self::new(config.two_digit_year_century)
    }

    /// Produce the canonical `YYYY-MM-DD HH:MM:SS.ffffff` string
    pub fn normalize(&self, input: &str) -> HelperResult<String> {
        self.parse(input)
            .map(|ts| ts.format(CANONICAL_LAYOUT).to_string())
    }

    /// Normalize and parse into a naive timestamp
    pub fn parse(&self, input: &str) -> HelperResult<NaiveDateTime> {
        let candidate = self.canonical_candidate(input)?;

        NaiveDateTime::parse_from_str(&candidate, PARSE_LAYOUT).map_err(|e| {
            HelperError::unparseable(input, format!("{candidate:?} is not a timestamp: {e}"))
        })
    }

    /// Normalize into a nullable timestamp, invalid on any failure
    pub fn to_pg_timestamp(&self, input: &str) -> PgTimestamp {
        match self.parse(input) {
            Ok(ts) => PgTimestamp::new(ts),
            Err(e) => {
                debug!("Timestamp normalization failed: {}", e);
                PgTimestamp::null()
            }
        }
    }

    /// Normalize into a nullable UTC timestamp, invalid on any failure
    pub fn to_pg_timestamptz(&self, input: &str) -> PgTimestamptz {
        match self.parse(input) {
            Ok(ts) => PgTimestamptz::new(ts.and_utc()),
            Err(e) => {
                debug!("Timestamptz normalization failed: {}", e);
                PgTimestamptz::null()
            }
        }
    }

    /// Rewrite the input into canonical shape without validating ranges
    ///
    /// Component widths are checked here: chrono's `%Y`, `%M` and `%S`
    /// accept fewer digits (and a sign on the year) than the canonical layout.
    fn canonical_candidate(&self, input: &str) -> HelperResult<String> {
        if !input.not_null() {
            return Err(HelperError::unparseable(input, "null-ish input"));
        }

        let input = input.replace('/', "-");

        let mut parts = input.split(' ');
        let date_part = parts.next().unwrap_or_default();
        let time_part = parts.next().unwrap_or(DEFAULT_TIME_PART);

        let components: Vec<&str> = date_part.split('-').collect();
        let [first, second, third] = components.as_slice() else {
            return Err(HelperError::unparseable(
                input.as_str(),
                format!("expected 3 date components, found {}", components.len()),
            ));
        };

        let (year, month, day) = if is_four_digit_year(first) {
            (first.to_string(), zero_pad(second), zero_pad(third))
        } else {
            (self.expand_year(third), zero_pad(second), zero_pad(first))
        };

        if !(is_digits(&year, 4..=4) && is_digits(&month, 2..=2) && is_digits(&day, 2..=2)) {
            return Err(HelperError::unparseable(
                input.as_str(),
                format!("date {year}-{month}-{day} does not match YYYY-MM-DD"),
            ));
        }

        let time = normalize_fraction(time_part);
        if !has_time_shape(&time) {
            return Err(HelperError::unparseable(
                input.as_str(),
                format!("time {time:?} does not match HH:MM:SS.ffffff"),
            ));
        }

        Ok(format!("{year}-{month}-{day} {time}"))
    }

    fn expand_year(&self, year: &str) -> String {
        if year.len() == 2 {
            format!("{}{}", self.two_digit_year_century / 100, year)
        } else {
            year.to_string()
        }
    }
}

fn is_four_digit_year(component: &str) -> bool {
    is_digits(component, 4..=4)
}

fn is_digits(component: &str, width: RangeInclusive<usize>) -> bool {
    width.contains(&component.len()) && component.bytes().all(|b| b.is_ascii_digit())
}

/// `H:MM:SS.ffffff` or `HH:MM:SS.ffffff`
fn has_time_shape(time: &str) -> bool {
    let Some((whole, fraction)) = time.split_once('.') else {
        return false;
    };
    let pieces: Vec<&str> = whole.split(':').collect();
    let [hour, minute, second] = pieces.as_slice() else {
        return false;
    };

    is_digits(hour, 1..=2)
        && is_digits(minute, 2..=2)
        && is_digits(second, 2..=2)
        && is_digits(fraction, FRACTION_DIGITS..=FRACTION_DIGITS)
}

fn zero_pad(component: &str) -> String {
    if component.len() == 1 {
        format!("0{}", component)
    } else {
        component.to_string()
    }
}

/// Force exactly six fractional digits onto a time part
fn normalize_fraction(time_part: &str) -> String {
    let mut pieces = time_part.split('.');
    let whole = pieces.next().unwrap_or_default();

    match pieces.next() {
        None => format!("{}.{}", whole, "0".repeat(FRACTION_DIGITS)),
        Some(fraction) => {
            let fraction: String = fraction.chars().take(FRACTION_DIGITS).collect();
            format!("{}.{:0<width$}", whole, fraction, width = FRACTION_DIGITS)
        }
    }
}

/// Canonical string for `input` using the default century
pub fn normalize_timestamp(input: &str) -> HelperResult<String> {
    TimestampNormalizer::default().normalize(input)
}

/// Convert a loosely formatted string to a nullable timestamp
pub fn string_to_pg_timestamp(input: &str) -> PgTimestamp {
    TimestampNormalizer::default().to_pg_timestamp(input)
}

/// Convert a loosely formatted string to a nullable UTC timestamp
pub fn string_to_pg_timestamptz(input: &str) -> PgTimestamptz {
    TimestampNormalizer::default().to_pg_timestamptz(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micros: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, micros)
            .unwrap()
    }

    #[test]
    fn test_null_ish_inputs_are_invalid() {
        for input in ["", " ", "null", "NULL", "nil"] {
            let result = string_to_pg_timestamp(input);
            assert!(!result.valid, "{input:?} should be invalid");
            assert!(matches!(
                normalize_timestamp(input),
                Err(HelperError::Unparseable { .. })
            ));
        }
    }

    #[test]
    fn test_iso_date_without_time() {
        assert_eq!(
            normalize_timestamp("2024-01-02").unwrap(),
            "2024-01-02 00:00:00.000000"
        );
        assert_eq!(
            string_to_pg_timestamp("2024-01-02"),
            PgTimestamp::new(at(2024, 1, 2, 0, 0, 0, 0))
        );
    }

    #[test]
    fn test_short_day_month_year() {
        assert_eq!(
            normalize_timestamp("2/1/24").unwrap(),
            "2024-01-02 00:00:00.000000"
        );
        assert_eq!(
            string_to_pg_timestamp("2/1/24").value,
            at(2024, 1, 2, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_full_date_time_without_fraction() {
        assert_eq!(
            normalize_timestamp("02/01/2024 15:04:05").unwrap(),
            "2024-01-02 15:04:05.000000"
        );
        assert!(string_to_pg_timestamp("02/01/2024 15:04:05").valid);
    }

    #[test]
    fn test_short_fraction_is_padded() {
        assert_eq!(
            normalize_timestamp("02-01-2024 15:04:05.1").unwrap(),
            "2024-01-02 15:04:05.100000"
        );
        assert_eq!(
            string_to_pg_timestamp("02-01-2024 15:04:05.1").value,
            at(2024, 1, 2, 15, 4, 5, 100_000)
        );
    }

    #[test]
    fn test_long_fraction_is_truncated() {
        assert_eq!(
            normalize_timestamp("02-01-2024 15:04:05.1234567").unwrap(),
            "2024-01-02 15:04:05.123456"
        );
        assert_eq!(
            normalize_timestamp("02-01-2024 15:04:05.").unwrap(),
            "2024-01-02 15:04:05.000000"
        );
    }

    #[test]
    fn test_out_of_range_date_is_invalid() {
        assert!(!string_to_pg_timestamp("2024/13/40").valid);
        assert!(!string_to_pg_timestamp("31/02/2024").valid);
        assert!(!string_to_pg_timestamp("02/01/2024 25:00:00").valid);
    }

    #[test]
    fn test_canonical_input_is_idempotent() {
        let canonical = "2024-01-02 15:04:05.000000";
        assert_eq!(normalize_timestamp(canonical).unwrap(), canonical);
        assert_eq!(
            string_to_pg_timestamp(canonical),
            PgTimestamp::new(at(2024, 1, 2, 15, 4, 5, 0))
        );

        let once = normalize_timestamp("2/1/24 9:05:07.25").unwrap();
        assert_eq!(normalize_timestamp(&once).unwrap(), once);
    }

    #[test]
    fn test_wrong_component_count_is_invalid() {
        for input in ["2024-01", "20240102", "1-2-3-2024", "02/01/2024/"] {
            assert!(!string_to_pg_timestamp(input).valid, "{input:?}");
        }
    }

    #[test]
    fn test_year_first_components_are_padded() {
        assert_eq!(
            normalize_timestamp("2024/1/2 08:30:00").unwrap(),
            "2024-01-02 08:30:00.000000"
        );
    }

    #[test]
    fn test_missing_seconds_is_invalid() {
        assert!(!string_to_pg_timestamp("02/01/2024 15:04").valid);
    }

    #[test]
    fn test_year_must_have_four_digits() {
        for input in ["2/1/7", "2/1/124", "02/01/+2024", "02/01/20245"] {
            assert!(
                matches!(
                    normalize_timestamp(input),
                    Err(HelperError::Unparseable { .. })
                ),
                "{input:?} should be unparseable"
            );
            assert!(!string_to_pg_timestamp(input).valid, "{input:?}");
        }
    }

    #[test]
    fn test_minutes_and_seconds_need_two_digits() {
        for input in ["02/01/2024 15:4:5", "02/01/2024 15:04:5", "02/01/2024 123:04:05"] {
            assert!(
                matches!(
                    normalize_timestamp(input),
                    Err(HelperError::Unparseable { .. })
                ),
                "{input:?} should be unparseable"
            );
        }
        assert_eq!(
            normalize_timestamp("02/01/2024 9:04:05").unwrap(),
            "2024-01-02 09:04:05.000000"
        );
    }

    #[test]
    fn test_configurable_century() {
        let normalizer = TimestampNormalizer::new(1900);
        assert_eq!(
            normalizer.normalize("2/1/99").unwrap(),
            "1999-01-02 00:00:00.000000"
        );

        let config = HelpersConfig::default();
        assert_eq!(
            TimestampNormalizer::from_config(&config),
            TimestampNormalizer::default()
        );
        assert_eq!(
            normalize_timestamp("2/1/99").unwrap(),
            "2099-01-02 00:00:00.000000"
        );
    }

    #[test]
    fn test_timestamptz_is_utc() {
        let result = string_to_pg_timestamptz("02/01/2024 15:04:05");
        assert!(result.valid);
        assert_eq!(result.value, at(2024, 1, 2, 15, 4, 5, 0).and_utc());
        assert!(!string_to_pg_timestamptz("nil").valid);
    }

    #[test]
    fn test_non_ascii_fraction_does_not_panic() {
        assert!(!string_to_pg_timestamp("02-01-2024 15:04:05.éé").valid);
    }
}
