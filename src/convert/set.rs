//! Native values to nullable wrappers
//!
//! Every converter takes anything that converts into a [`Value`] and never
//! fails: inputs a converter does not understand produce an invalid wrapper.

use crate::datetime::layouts::{string_to_pg_date, string_to_pg_timestamptz_layouts};
use crate::datetime::normalizer::string_to_pg_timestamp;
use crate::pgtype::{
    PgBool, PgDate, PgFloat, PgInt, PgNumeric, PgText, PgTimestamp, PgTimestamptz,
};
use crate::value::Value;
use bigdecimal::{BigDecimal, FromPrimitive};
use std::fmt::Display;
use tracing::warn;

/// Text from strings, byte strings and displayable values, valid when non-empty
pub fn set_text_field(value: impl Into<Value>) -> PgText {
    match value.into() {
        Value::Bytes(bytes) => {
            let valid = !bytes.is_empty();
            PgText::with_validity(String::from_utf8_lossy(&bytes).into_owned(), valid)
        }
        other => match other.display_text() {
            Some(text) => {
                let valid = !text.is_empty();
                PgText::with_validity(text, valid)
            }
            None => PgText::null(),
        },
    }
}

/// `PgFloat4` or `PgFloat8` from a float input
pub fn set_float_field<T: PgFloat + Default>(value: impl Into<Value>) -> T {
    match value.into() {
        Value::Float32(v) => T::from_f64(f64::from(v)),
        Value::Float64(v) => T::from_f64(v),
        _ => T::default(),
    }
}

/// `PgInt2`, `PgInt4` or `PgInt8` from an integer input
///
/// Narrowing truncates: `70000` stored in a `PgInt2` wraps.
pub fn set_int_field<T: PgInt + Default>(value: impl Into<Value>) -> T {
    match value.into() {
        Value::Int32(v) => T::from_i64(i64::from(v)),
        Value::Int64(v) => T::from_i64(v),
        _ => T::default(),
    }
}

/// Exact decimal from an integer or float input
///
/// Floats use their shortest round-trip text, so `0.1_f32` is stored as `0.1`.
/// NaN and infinities are invalid.
pub fn set_numeric_field(value: impl Into<Value>) -> PgNumeric {
    let decimal = match value.into() {
        Value::Int32(v) => Some(BigDecimal::from(i64::from(v))),
        Value::Int64(v) => Some(BigDecimal::from(v)),
        Value::Float32(v) => float_to_decimal(v),
        Value::Float64(v) => float_to_decimal(v),
        _ => None,
    };

    PgNumeric::from_option(decimal)
}

fn float_to_decimal<F: Into<f64> + Display + Copy>(value: F) -> Option<BigDecimal> {
    let wide: f64 = value.into();
    if !wide.is_finite() {
        warn!("Cannot store non-finite float {} as numeric", value);
        return None;
    }

    value
        .to_string()
        .parse::<BigDecimal>()
        .ok()
        .or_else(|| BigDecimal::from_f64(wide))
}

/// Boolean from booleans, numbers (`!= 0`) and strings (`!= "0"`)
pub fn set_bool_field(value: impl Into<Value>) -> PgBool {
    match value.into() {
        Value::Bool(v) => PgBool::new(v),
        Value::Int32(v) => PgBool::new(v != 0),
        Value::Int64(v) => PgBool::new(v != 0),
        Value::Float32(v) => PgBool::new(v != 0.0),
        Value::Float64(v) => PgBool::new(v != 0.0),
        Value::String(v) => PgBool::new(v != "0"),
        _ => PgBool::null(),
    }
}

/// Boolean from its textual forms
///
/// `1`, `true`, `t`, `T` are true; `0`, `false`, `f`, `F` are false; `null`
/// and blank strings are invalid; anything else is a valid `false`.
pub fn pg_bool(input: &str) -> PgBool {
    match input {
        "1" | "true" | "t" | "T" => PgBool::new(true),
        "0" | "false" | "f" | "F" => PgBool::new(false),
        "null" | "" | " " | "  " => PgBool::null(),
        _ => PgBool::new(false),
    }
}

/// Date from a time value or a string in one of the accepted date layouts
pub fn set_date_field(value: impl Into<Value>) -> PgDate {
    match value.into() {
        Value::Date(date) => PgDate::new(date),
        Value::Timestamp(ts) => PgDate::new(ts.date()),
        Value::TimestampTz(ts) => PgDate::new(ts.date_naive()),
        Value::String(s) => string_to_pg_date(&s),
        _ => PgDate::null(),
    }
}

/// Timestamp from a time value or a loosely formatted string
pub fn set_timestamp_field(value: impl Into<Value>) -> PgTimestamp {
    match value.into() {
        Value::String(s) => string_to_pg_timestamp(&s),
        other => PgTimestamp::from_option(other.as_naive_datetime()),
    }
}

/// UTC timestamp from a time value or an RFC 3339 / ISO string
pub fn set_timestamptz_field(value: impl Into<Value>) -> PgTimestamptz {
    match value.into() {
        Value::TimestampTz(ts) => PgTimestamptz::new(ts),
        Value::String(s) => string_to_pg_timestamptz_layouts(&s),
        other => PgTimestamptz::from_option(other.as_naive_datetime().map(|ts| ts.and_utc())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgtype::{PgFloat4, PgFloat8, PgInt2, PgInt4, PgInt8};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    #[test]
    fn test_set_text_field() {
        assert_eq!(set_text_field("abc"), PgText::new("abc".to_string()));
        assert!(!set_text_field("").valid);
        assert_eq!(set_text_field(b"xyz".as_slice()).value, "xyz");
        assert!(!set_text_field(Vec::<u8>::new()).valid);
        assert_eq!(
            set_text_field(Uuid::nil()).value,
            "00000000-0000-0000-0000-000000000000"
        );
        assert!(!set_text_field(12_i32).valid);
        assert!(!set_text_field(None::<String>).valid);
    }

    #[test]
    fn test_set_float_field() {
        let f4: PgFloat4 = set_float_field(1.25_f64);
        assert_eq!(f4, PgFloat4::new(1.25));

        let f8: PgFloat8 = set_float_field(2.5_f32);
        assert_eq!(f8, PgFloat8::new(2.5));

        let nil: PgFloat8 = set_float_field(None::<f64>);
        assert!(!nil.valid);

        let from_int: PgFloat8 = set_float_field(3_i32);
        assert!(!from_int.valid);
    }

    #[test]
    fn test_set_int_field() {
        let small: PgInt2 = set_int_field(7_i64);
        let regular: PgInt4 = set_int_field(-9_i32);
        let wide: PgInt8 = set_int_field(i64::MAX);
        assert_eq!(small, PgInt2::new(7));
        assert_eq!(regular, PgInt4::new(-9));
        assert_eq!(wide, PgInt8::new(i64::MAX));

        let from_str: PgInt4 = set_int_field("7");
        assert!(!from_str.valid);
        let from_float: PgInt8 = set_int_field(1.0_f64);
        assert!(!from_float.valid);
    }

    #[test]
    fn test_set_numeric_field() {
        assert_eq!(set_numeric_field(42_i64).value, BigDecimal::from(42_i64));
        assert_eq!(
            set_numeric_field(12.34_f64).value,
            BigDecimal::from_str("12.34").unwrap()
        );
        assert_eq!(
            set_numeric_field(0.1_f32).value,
            BigDecimal::from_str("0.1").unwrap()
        );
        assert!(!set_numeric_field(f64::NAN).valid);
        assert!(!set_numeric_field(f64::INFINITY).valid);
        assert!(!set_numeric_field("12").valid);
    }

    #[test]
    fn test_set_bool_field() {
        assert_eq!(set_bool_field(true), PgBool::new(true));
        assert_eq!(set_bool_field(0_i32), PgBool::new(false));
        assert_eq!(set_bool_field(5_i64), PgBool::new(true));
        assert_eq!(set_bool_field(0.0_f64), PgBool::new(false));
        assert_eq!(set_bool_field("0"), PgBool::new(false));
        assert_eq!(set_bool_field("no"), PgBool::new(true));
        assert!(!set_bool_field(Uuid::nil()).valid);
    }

    #[test]
    fn test_pg_bool() {
        for input in ["1", "true", "t", "T"] {
            assert_eq!(pg_bool(input), PgBool::new(true), "{input:?}");
        }
        for input in ["0", "false", "f", "F"] {
            assert_eq!(pg_bool(input), PgBool::new(false), "{input:?}");
        }
        for input in ["null", "", " ", "  "] {
            assert!(!pg_bool(input).valid, "{input:?}");
        }
        assert_eq!(pg_bool("yes"), PgBool::new(false));
    }

    #[test]
    fn test_set_date_field() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(set_date_field(date), PgDate::new(date));
        assert_eq!(
            set_date_field(date.and_hms_opt(23, 0, 0).unwrap()),
            PgDate::new(date)
        );
        assert_eq!(set_date_field("02/01/2024"), PgDate::new(date));
        assert!(!set_date_field(None::<NaiveDate>).valid);
        assert!(!set_date_field(1_i32).valid);
    }

    #[test]
    fn test_set_timestamp_field() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(15, 4, 5)
            .unwrap();
        assert_eq!(set_timestamp_field(ts), PgTimestamp::new(ts));
        assert_eq!(set_timestamp_field("02/01/2024 15:04:05"), PgTimestamp::new(ts));
        assert_eq!(set_timestamp_field(ts.and_utc()), PgTimestamp::new(ts));
        assert!(!set_timestamp_field("null").valid);
        assert!(!set_timestamp_field(None::<chrono::NaiveDateTime>).valid);
    }

    #[test]
    fn test_set_timestamptz_field() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 17, 8, 0, 0).unwrap();
        assert_eq!(set_timestamptz_field(expected), PgTimestamptz::new(expected));
        assert_eq!(
            set_timestamptz_field("2025-06-17T15:00:00+07:00"),
            PgTimestamptz::new(expected)
        );
        assert_eq!(
            set_timestamptz_field(expected.naive_utc()),
            PgTimestamptz::new(expected)
        );
        assert!(!set_timestamptz_field("yesterday").valid);
        assert!(!set_timestamptz_field(false).valid);
    }
}
