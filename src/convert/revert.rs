//! Nullable wrappers back to native values
//!
//! Each function takes a wrapper or an optional reference to one. Invalid or
//! absent wrappers give the native zero value (`""`, `0`, `false`), or `None`
//! for time types, which have no zero value.

use crate::pgtype::{PgBool, PgDate, PgFloat, PgInt, PgText, PgTimestamp, PgTimestamptz};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub fn revert_pg_text<'a>(value: impl Into<Option<&'a PgText>>) -> String {
    value
        .into()
        .and_then(|v| v.as_option().cloned())
        .unwrap_or_default()
}

pub fn revert_pg_bool<'a>(value: impl Into<Option<&'a PgBool>>) -> bool {
    value
        .into()
        .and_then(|v| v.as_option().copied())
        .unwrap_or_default()
}

pub fn revert_pg_date<'a>(value: impl Into<Option<&'a PgDate>>) -> Option<NaiveDate> {
    value.into().and_then(|v| v.as_option().copied())
}

pub fn revert_pg_timestamp<'a>(value: impl Into<Option<&'a PgTimestamp>>) -> Option<NaiveDateTime> {
    value.into().and_then(|v| v.as_option().copied())
}

pub fn revert_pg_timestamptz<'a>(
    value: impl Into<Option<&'a PgTimestamptz>>,
) -> Option<DateTime<Utc>> {
    value.into().and_then(|v| v.as_option().copied())
}

/// `PgFloat4` or `PgFloat8` as `f64`, `0.0` when invalid
pub fn revert_float_field<T: PgFloat>(value: &T) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// `PgInt2`, `PgInt4` or `PgInt8` as `i64`, `0` when invalid
pub fn revert_int_field<T: PgInt>(value: &T) -> i64 {
    value.to_i64().unwrap_or_default()
}
